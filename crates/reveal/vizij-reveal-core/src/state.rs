//! Lifecycle enums for a single reveal target.

use serde::{Deserialize, Serialize};

use crate::ids::TargetId;
use crate::target::AnimationId;

/// `Hidden → (WaitingForScroll →) Revealing → Revealed`; nothing leaves `Revealed`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    #[default]
    Hidden,
    WaitingForScroll,
    Revealing,
    Revealed,
}

impl RevealState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, RevealState::Revealed)
    }
}

/// Which animation markers have been applied. Markers are never removed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationPhase {
    #[default]
    None,
    Prepared,
    Played,
}

/// Branch taken by the trigger decision at invoke time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerPath {
    /// Target starts inside the first screenful or is in preview mode.
    InitialView,
    /// Off-screen with nothing to animate; shown without waiting.
    NoAnimation,
    /// Off-screen with a named intro; waits for the first scroll crossing.
    Scroll,
}

/// Inspectable view of one controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetSnapshot {
    pub target: TargetId,
    pub state: RevealState,
    pub phase: AnimationPhase,
    pub animation: AnimationId,
    pub trigger: Option<TriggerPath>,
    pub invoked: bool,
}
