//! Per-target configuration and the resolved intro animation.

use serde::{Deserialize, Serialize};

/// Configuration attached to one element. Every field is optional on the wire;
/// absent values degrade to "not inline", "not preview", no intro and offset 0.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetSpec {
    /// Opt-in marker. Targets without it are never touched.
    pub inline: bool,
    pub preview: bool,
    /// Raw intro animation id as authored; empty means none.
    pub intro: Option<String>,
    /// Distance from the document top to the element, in CSS pixels.
    pub offset_top: f32,
}

impl TargetSpec {
    pub fn inline(offset_top: f32) -> Self {
        Self {
            inline: true,
            offset_top,
            ..Self::default()
        }
    }

    pub fn with_intro(mut self, intro: impl Into<String>) -> Self {
        self.intro = Some(intro.into());
        self
    }

    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }
}

/// Resolved intro animation shared by the prepare and play phases.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationId {
    #[default]
    None,
    Named(String),
}

impl AnimationId {
    /// Empty and sentinel values both resolve to `None`.
    ///
    /// Leading and trailing whitespace is trimmed first, so `" slide "` names
    /// `slide` and a whitespace-only value counts as empty. Inner whitespace is
    /// kept; `Config::animate_in_classes` splits it into separate tokens.
    pub fn resolve(raw: Option<&str>, sentinel: &str) -> Self {
        match raw.map(str::trim) {
            None | Some("") => AnimationId::None,
            Some(s) if s == sentinel => AnimationId::None,
            Some(s) => AnimationId::Named(s.to_string()),
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, AnimationId::None)
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            AnimationId::None => None,
            AnimationId::Named(s) => Some(s),
        }
    }
}
