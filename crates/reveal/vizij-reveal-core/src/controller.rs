//! RevealController: per-target reveal and intro animation state machine.
//!
//! The controller is host-agnostic. It never touches timers or scroll
//! listeners itself; each transition writes marker changes into `Outputs` and
//! tells the caller what to schedule next (a one-shot delay, or a scroll
//! subscription to drop). `Engine` and the DOM adapter wire those requests.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::ids::TargetId;
use crate::outputs::{Change, Outputs, Part, RevealEvent};
use crate::state::{AnimationPhase, RevealState, TargetSnapshot, TriggerPath};
use crate::target::{AnimationId, TargetSpec};
use crate::viewport::Viewport;

/// Result of feeding one scroll sample to a controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollOutcome {
    /// Not waiting for scroll (never subscribed, or already triggered).
    Ignored,
    /// Still below the threshold; keep observing.
    Waiting,
    /// First crossing. The show marker is applied; the caller must detach the
    /// scroll observer and schedule phase B after `delay_ms`.
    Triggered { delay_ms: u64 },
}

#[derive(Clone, Debug)]
pub struct RevealController {
    id: TargetId,
    spec: TargetSpec,
    animation: AnimationId,
    state: RevealState,
    phase: AnimationPhase,
    trigger: Option<TriggerPath>,
    invoked: bool,
}

impl RevealController {
    pub fn new(id: TargetId, spec: TargetSpec, cfg: &Config) -> Self {
        let animation = AnimationId::resolve(spec.intro.as_deref(), &cfg.no_animation);
        Self {
            id,
            spec,
            animation,
            state: RevealState::Hidden,
            phase: AnimationPhase::None,
            trigger: None,
            invoked: false,
        }
    }

    /// Run the entry side effects, phase A and the trigger decision.
    ///
    /// Returns `Some(delay_ms)` when the show marker was applied and phase B
    /// must run after the delay; `None` when the target is not inline, was
    /// already invoked, or now waits for scroll.
    pub fn invoke(&mut self, viewport: &Viewport, cfg: &Config, out: &mut Outputs) -> Option<u64> {
        if !self.spec.inline {
            trace!("{}: not an inline target, skipping", self.id);
            return None;
        }
        if self.invoked {
            debug!("{}: already invoked, ignoring", self.id);
            return None;
        }
        self.invoked = true;

        out.push_change(Change::RemoveClass {
            target: self.id,
            part: Part::Root,
            class: cfg.classes.shown.clone(),
        });
        out.push_change(Change::SetOpacity {
            target: self.id,
            opacity: 1.0,
        });

        // Phase A lands before any show marker, on every path.
        if !self.animation.is_none() {
            out.push_change(Change::AddClass {
                target: self.id,
                part: Part::Content,
                class: cfg.classes.animate.clone(),
            });
            self.phase = AnimationPhase::Prepared;
        }

        let offset = self.spec.offset_top;
        if viewport.is_in_initial_view(offset) || self.spec.preview {
            self.trigger = Some(TriggerPath::InitialView);
            debug!(
                "{}: in initial view (preview={}), revealing",
                self.id, self.spec.preview
            );
            self.load(cfg.in_view_delay_ms, cfg, out)
        } else if self.animation.is_none() {
            self.trigger = Some(TriggerPath::NoAnimation);
            debug!("{}: off-screen without intro, revealing", self.id);
            self.load(cfg.no_animation_delay_ms, cfg, out)
        } else {
            self.trigger = Some(TriggerPath::Scroll);
            self.state = RevealState::WaitingForScroll;
            debug!(
                "{}: waiting for scroll to reach offset {}",
                self.id, offset
            );
            None
        }
    }

    /// Re-evaluate the crossing threshold for one scroll sample.
    pub fn on_scroll(&mut self, viewport: &Viewport, cfg: &Config, out: &mut Outputs) -> ScrollOutcome {
        if self.state != RevealState::WaitingForScroll {
            return ScrollOutcome::Ignored;
        }
        trace!(
            "{}: scroll sample {} + {} vs {}",
            self.id,
            viewport.scroll_top,
            viewport.height,
            self.spec.offset_top
        );
        if !viewport.has_crossed(self.spec.offset_top) {
            return ScrollOutcome::Waiting;
        }
        match self.load(cfg.scroll_delay_ms, cfg, out) {
            Some(delay_ms) => ScrollOutcome::Triggered { delay_ms },
            None => ScrollOutcome::Ignored,
        }
    }

    /// Apply the show marker and enter `Revealing`.
    ///
    /// Only the first call after `invoke` has an effect. A call before
    /// `invoke` (entry effects and phase A not yet applied) or after the show
    /// marker returns `None`, so the caller schedules nothing.
    pub fn load(&mut self, delay_ms: u64, cfg: &Config, out: &mut Outputs) -> Option<u64> {
        if !self.spec.inline {
            return None;
        }
        if !self.invoked {
            debug!("{}: load({delay_ms}) before invoke, ignoring", self.id);
            return None;
        }
        match self.state {
            RevealState::Hidden | RevealState::WaitingForScroll => {}
            RevealState::Revealing | RevealState::Revealed => {
                debug!("{}: load({delay_ms}) while {:?}, ignoring", self.id, self.state);
                return None;
            }
        }
        self.state = RevealState::Revealing;
        out.push_change(Change::AddClass {
            target: self.id,
            part: Part::Root,
            class: cfg.classes.shown.clone(),
        });
        Some(delay_ms)
    }

    /// Phase B: apply the played marker (if any), emit `Displayed` and enter
    /// the terminal state. Returns false when there was nothing to complete.
    pub fn complete(&mut self, now_ms: u64, cfg: &Config, out: &mut Outputs) -> bool {
        if self.state != RevealState::Revealing {
            return false;
        }
        if let Some(name) = self.animation.name() {
            for class in cfg.animate_in_classes(name) {
                out.push_change(Change::AddClass {
                    target: self.id,
                    part: Part::Content,
                    class,
                });
            }
            self.phase = AnimationPhase::Played;
        }
        out.push_event(RevealEvent::Displayed {
            target: self.id,
            animation: self.animation.name().map(str::to_string),
            at_ms: now_ms,
        });
        self.state = RevealState::Revealed;
        debug!("{}: displayed at {now_ms}ms", self.id);
        true
    }

    #[inline]
    pub fn id(&self) -> TargetId {
        self.id
    }

    #[inline]
    pub fn spec(&self) -> &TargetSpec {
        &self.spec
    }

    #[inline]
    pub fn animation(&self) -> &AnimationId {
        &self.animation
    }

    #[inline]
    pub fn state(&self) -> RevealState {
        self.state
    }

    #[inline]
    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    #[inline]
    pub fn trigger(&self) -> Option<TriggerPath> {
        self.trigger
    }

    #[inline]
    pub fn is_invoked(&self) -> bool {
        self.invoked
    }

    pub fn snapshot(&self) -> TargetSnapshot {
        TargetSnapshot {
            target: self.id,
            state: self.state,
            phase: self.phase,
            animation: self.animation.clone(),
            trigger: self.trigger,
            invoked: self.invoked,
        }
    }
}
