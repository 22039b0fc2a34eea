//! Error types surfaced by the reveal engine's host-facing API.
//!
//! The reveal decision itself never fails: a target without the inline marker
//! is a silent no-op and missing configuration falls back to defaults. Errors
//! only arise at the edges (unknown handles, malformed config or JSON).

use thiserror::Error;

use crate::ids::TargetId;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum RevealError {
    /// The handle was never returned by `Engine::register`.
    #[error("unknown reveal target: {0}")]
    UnknownTarget(TargetId),

    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("target json parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for RevealError {
    fn from(e: serde_json::Error) -> Self {
        RevealError::Parse(e.to_string())
    }
}
