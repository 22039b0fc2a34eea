//! Engine: owns reveal controllers, the virtual clock, one-shot timers and
//! scroll subscriptions.
//!
//! Methods:
//! - new, register, invoke, invoke_all, update (resize → scroll samples → clock → timers)

use log::{debug, warn};

use crate::config::Config;
use crate::controller::{RevealController, ScrollOutcome};
use crate::error::RevealError;
use crate::ids::{IdAllocator, TargetId};
use crate::inputs::Inputs;
use crate::outputs::Outputs;
use crate::state::{RevealState, TargetSnapshot};
use crate::target::TargetSpec;
use crate::timer::TimerQueue;
use crate::viewport::Viewport;

/// Host for any number of independent reveal targets.
#[derive(Debug)]
pub struct Engine {
    cfg: Config,
    ids: IdAllocator,
    targets: Vec<RevealController>,
    viewport: Viewport,
    now_ms: u64,
    timers: TimerQueue,
    /// Targets currently observing scroll, in subscription order.
    scroll_watchers: Vec<TargetId>,

    // Per-call outputs
    outputs: Outputs,
}

impl Engine {
    /// Create a new engine with the given config and an empty viewport.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            ids: IdAllocator::new(),
            targets: Vec::new(),
            viewport: Viewport::default(),
            now_ms: 0,
            timers: TimerQueue::new(),
            scroll_watchers: Vec::new(),
            outputs: Outputs::default(),
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Replace the current viewport sample without notifying scroll watchers.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Register a target; it stays `Hidden` until invoked.
    pub fn register(&mut self, spec: TargetSpec) -> TargetId {
        let id = self.ids.alloc_target();
        self.targets.push(RevealController::new(id, spec, &self.cfg));
        id
    }

    /// Invoke one target at the current viewport and clock.
    pub fn invoke(&mut self, target: TargetId) -> Result<&Outputs, RevealError> {
        self.outputs.clear();
        self.invoke_one(target)?;
        Ok(&self.outputs)
    }

    /// Invoke every registered target that has not been invoked yet, in
    /// registration order.
    pub fn invoke_all(&mut self) -> &Outputs {
        self.outputs.clear();
        for idx in 0..self.targets.len() {
            let id = self.targets[idx].id();
            if !self.targets[idx].is_invoked() {
                if let Err(e) = self.invoke_one(id) {
                    warn!("{id}: invoke_all skipped target: {e}");
                }
            }
        }
        &self.outputs
    }

    /// Apply host samples, advance the clock by `dt_ms`, and fire due timers.
    pub fn update(&mut self, dt_ms: u64, inputs: Inputs) -> &Outputs {
        self.outputs.clear();

        if let Some(height) = inputs.viewport_height {
            self.viewport.height = height;
        }
        for scroll_top in inputs.scroll {
            self.viewport.scroll_top = scroll_top;
            self.dispatch_scroll();
        }

        self.now_ms = self.now_ms.saturating_add(dt_ms);
        while let Some(due) = self.timers.pop_due(self.now_ms) {
            if let Some(ctl) = self.targets.get_mut(due.target.0 as usize) {
                // Report the deadline rather than the tick boundary.
                ctl.complete(due.deadline_ms, &self.cfg, &mut self.outputs);
            }
        }
        &self.outputs
    }

    pub fn controller(&self, target: TargetId) -> Result<&RevealController, RevealError> {
        self.targets
            .get(target.0 as usize)
            .ok_or(RevealError::UnknownTarget(target))
    }

    pub fn snapshot(&self, target: TargetId) -> Result<TargetSnapshot, RevealError> {
        self.controller(target).map(RevealController::snapshot)
    }

    pub fn is_watching_scroll(&self, target: TargetId) -> bool {
        self.scroll_watchers.contains(&target)
    }

    #[inline]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    #[inline]
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    fn invoke_one(&mut self, target: TargetId) -> Result<(), RevealError> {
        let ctl = self
            .targets
            .get_mut(target.0 as usize)
            .ok_or(RevealError::UnknownTarget(target))?;
        match ctl.invoke(&self.viewport, &self.cfg, &mut self.outputs) {
            Some(delay_ms) => {
                self.timers.schedule(self.now_ms.saturating_add(delay_ms), target);
            }
            None if ctl.state() == RevealState::WaitingForScroll => {
                if !self.scroll_watchers.contains(&target) {
                    self.scroll_watchers.push(target);
                }
            }
            None => {}
        }
        Ok(())
    }

    /// Feed the current viewport to every watcher; detach on first crossing.
    fn dispatch_scroll(&mut self) {
        let viewport = self.viewport;
        let now_ms = self.now_ms;
        let cfg = &self.cfg;
        let targets = &mut self.targets;
        let timers = &mut self.timers;
        let outputs = &mut self.outputs;

        self.scroll_watchers.retain(|&id| {
            let Some(ctl) = targets.get_mut(id.0 as usize) else {
                return false;
            };
            match ctl.on_scroll(&viewport, cfg, outputs) {
                ScrollOutcome::Waiting => true,
                ScrollOutcome::Triggered { delay_ms } => {
                    timers.schedule(now_ms.saturating_add(delay_ms), id);
                    debug!("{id}: crossed at scroll {}, detaching", viewport.scroll_top);
                    false
                }
                ScrollOutcome::Ignored => false,
            }
        });
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
