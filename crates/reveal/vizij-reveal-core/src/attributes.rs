//! Build a `TargetSpec` from the data a host element carries: its class
//! attribute, its `data-intro` value and its document offset.

use crate::config::Config;
use crate::error::RevealError;
use crate::target::TargetSpec;

/// Name of the data attribute holding the intro animation id.
pub const INTRO_ATTRIBUTE: &str = "data-intro";

/// True when the whitespace-separated `class_attr` contains `class`.
pub fn has_class(class_attr: &str, class: &str) -> bool {
    class_attr.split_ascii_whitespace().any(|c| c == class)
}

impl TargetSpec {
    pub fn from_attributes(
        class_attr: &str,
        intro: Option<&str>,
        offset_top: f32,
        cfg: &Config,
    ) -> Self {
        Self {
            inline: has_class(class_attr, &cfg.classes.inline),
            preview: has_class(class_attr, &cfg.classes.preview),
            intro: intro.map(str::to_string),
            offset_top,
        }
    }
}

/// Parse a `TargetSpec` from JSON; missing fields take their defaults.
pub fn parse_target_json(json: &str) -> Result<TargetSpec, RevealError> {
    Ok(serde_json::from_str(json)?)
}
