//! Vizij Reveal Core (engine-agnostic)
//!
//! Decides when an inline element is revealed (immediately, on load when in
//! view, or on the first scroll crossing), sequences its two-phase intro
//! animation (prepare, then play) and emits exactly one `Displayed` event per
//! invoke. Hosts feed viewport samples and elapsed time into [`Engine`] and
//! apply the returned marker [`Change`]s; [`RevealController`] can also be
//! driven directly when the host owns its own timers.

pub mod attributes;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod ids;
pub mod inputs;
pub mod outputs;
pub mod state;
pub mod target;
pub mod timer;
pub mod viewport;

// Re-exports for consumers (adapters)
pub use attributes::{has_class, parse_target_json, INTRO_ATTRIBUTE};
pub use config::{Classes, Config};
pub use controller::{RevealController, ScrollOutcome};
pub use engine::Engine;
pub use error::RevealError;
pub use ids::{TargetId, TimerId};
pub use inputs::Inputs;
pub use outputs::{Change, Outputs, Part, RevealEvent};
pub use state::{AnimationPhase, RevealState, TargetSnapshot, TriggerPath};
pub use target::{AnimationId, TargetSpec};
pub use timer::TimerQueue;
pub use viewport::Viewport;
