//! Input contracts for the reveal engine.
//!
//! Hosts collect viewport samples between ticks and pass them into
//! `Engine::update()`; scroll samples are applied in order before the clock
//! advances.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    /// New viewport height after a resize, applied before scroll samples.
    #[serde(default)]
    pub viewport_height: Option<f32>,
    /// Scroll offsets observed since the previous tick, oldest first.
    #[serde(default)]
    pub scroll: Vec<f32>,
}

impl Inputs {
    pub fn scrolled(offsets: impl IntoIterator<Item = f32>) -> Self {
        Self {
            viewport_height: None,
            scroll: offsets.into_iter().collect(),
        }
    }
}
