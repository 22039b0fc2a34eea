//! Core configuration for vizij-reveal-core.

use serde::{Deserialize, Serialize};

use crate::error::RevealError;

/// Timing and marker names used by the reveal sequencer.
///
/// The class names and event name are the contract with the stylesheet and
/// with listeners on the page; defaults match the shipped inline module CSS.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Delay between the show marker and phase B when the target starts in
    /// view or is rendered in preview mode.
    pub in_view_delay_ms: u64,
    /// Delay used when the target is off-screen but has nothing to animate.
    pub no_animation_delay_ms: u64,
    /// Delay used after the first scroll crossing.
    pub scroll_delay_ms: u64,

    /// Sentinel intro value meaning "no animation".
    pub no_animation: String,
    /// Name of the custom event dispatched once a target finished revealing.
    pub displayed_event: String,

    pub classes: Classes,
}

/// CSS-facing marker names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classes {
    /// Opt-in marker on the target; targets without it are left untouched.
    pub inline: String,
    /// Authoring/editing marker forcing an immediate reveal.
    pub preview: String,
    /// Inner element carrying the animate markers.
    pub content: String,
    pub shown: String,
    pub animate: String,
    /// Prefix for the played marker; the resolved animation id is appended.
    pub animate_in_prefix: String,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            inline: "hustle-inline".into(),
            preview: "hustle-preview".into(),
            content: "hustle-inline-content".into(),
            shown: "hustle-show".into(),
            animate: "hustle-animate".into(),
            animate_in_prefix: "hustle-animate-in--".into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            in_view_delay_ms: 200,
            no_animation_delay_ms: 100,
            scroll_delay_ms: 100,
            no_animation: "no_animation".into(),
            displayed_event: "hustle:module:displayed".into(),
            classes: Classes::default(),
        }
    }
}

impl Config {
    /// Played marker for a named animation, e.g. `hustle-animate-in--slide`.
    pub fn animate_in_class(&self, animation: &str) -> String {
        format!("{}{}", self.classes.animate_in_prefix, animation)
    }

    /// Played marker split into class tokens. An id with inner whitespace
    /// (`"slide left"`) yields one token per word, the first one prefixed:
    /// `["hustle-animate-in--slide", "left"]`. No token contains whitespace.
    pub fn animate_in_classes(&self, animation: &str) -> Vec<String> {
        self.animate_in_class(animation)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// Reject names the DOM would refuse (`classList.add` throws on empty or
    /// whitespace-bearing tokens).
    pub fn validate(&self) -> Result<(), RevealError> {
        let tokens: [(&'static str, &str); 7] = [
            ("classes.inline", &self.classes.inline),
            ("classes.preview", &self.classes.preview),
            ("classes.content", &self.classes.content),
            ("classes.shown", &self.classes.shown),
            ("classes.animate", &self.classes.animate),
            ("classes.animate_in_prefix", &self.classes.animate_in_prefix),
            ("displayed_event", &self.displayed_event),
        ];
        for (field, value) in tokens {
            check_token(field, value)?;
        }
        if self.no_animation.is_empty() {
            return Err(RevealError::InvalidConfig {
                field: "no_animation",
                reason: "sentinel must not be empty".into(),
            });
        }
        Ok(())
    }
}

fn check_token(field: &'static str, value: &str) -> Result<(), RevealError> {
    if value.is_empty() {
        return Err(RevealError::InvalidConfig {
            field,
            reason: "must not be empty".into(),
        });
    }
    if value.chars().any(char::is_whitespace) {
        return Err(RevealError::InvalidConfig {
            field,
            reason: format!("`{value}` contains whitespace"),
        });
    }
    Ok(())
}
