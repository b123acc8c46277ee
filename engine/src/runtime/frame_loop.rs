//! Frame Loop
//!
//! A cancellable per-frame task. The host calls [`FrameLoop::run_frame`] once
//! per redraw; after any [`FrameHandle`] cancels, the callback never runs
//! again. Nothing reschedules itself, so teardown is just "cancel and stop
//! requesting redraws".

use std::cell::Cell;
use std::rc::Rc;

/// Owner side of the per-frame task.
#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    disposed: Rc<Cell<bool>>,
    frames_run: u64,
}

/// Shared cancel switch for a [`FrameLoop`].
#[derive(Debug, Clone)]
pub struct FrameHandle {
    disposed: Rc<Cell<bool>>,
}

impl FrameHandle {
    /// Stop the loop. Idempotent.
    pub fn cancel(&self) {
        if !self.disposed.replace(true) {
            log::debug!("frame loop cancelled");
        }
    }

    pub fn is_live(&self) -> bool {
        !self.disposed.get()
    }
}

impl FrameLoop {
    /// A live loop that has not run any frames.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> FrameHandle {
        FrameHandle {
            disposed: Rc::clone(&self.disposed),
        }
    }

    pub fn is_live(&self) -> bool {
        !self.disposed.get()
    }

    /// Number of frames that actually ran.
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    /// Run one frame if the loop is still live.
    ///
    /// Returns `true` when the callback ran.
    pub fn run_frame<F>(&mut self, delta_seconds: f32, frame: F) -> bool
    where
        F: FnOnce(f32),
    {
        if !self.is_live() {
            return false;
        }
        frame(delta_seconds);
        self.frames_run += 1;
        true
    }
}
