//! Output contracts from the reveal engine.
//!
//! Outputs carry the marker mutations produced by one call, keyed by target,
//! and a separate list of semantic events. Adapters (DOM/WASM) apply changes
//! to the host and transport events.

use serde::{Deserialize, Serialize};

use crate::ids::TargetId;

/// Element a marker applies to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    /// The target element itself (opacity, shown marker).
    Root,
    /// The inner content element (animate markers).
    Content,
}

/// One DOM-facing mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    SetOpacity {
        target: TargetId,
        opacity: f32,
    },
    AddClass {
        target: TargetId,
        part: Part,
        class: String,
    },
    RemoveClass {
        target: TargetId,
        part: Part,
        class: String,
    },
}

impl Change {
    pub fn target(&self) -> TargetId {
        match self {
            Change::SetOpacity { target, .. }
            | Change::AddClass { target, .. }
            | Change::RemoveClass { target, .. } => *target,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum RevealEvent {
    /// The target finished its reveal timing. Emitted at most once per invoke.
    Displayed {
        target: TargetId,
        animation: Option<String>,
        at_ms: u64,
    },
}

/// Outputs returned by `Engine::invoke` and `Engine::update`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<RevealEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: RevealEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    /// Changes addressed to one target, in emission order.
    pub fn changes_for(&self, target: TargetId) -> impl Iterator<Item = &Change> {
        self.changes.iter().filter(move |c| c.target() == target)
    }

    /// Number of `Displayed` events for one target.
    pub fn displayed_count(&self, target: TargetId) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RevealEvent::Displayed { target: t, .. } if *t == target))
            .count()
    }
}
