//! Frame Clock
//!
//! Wall-clock deltas between redraws. A tab-out, a debugger pause, or a
//! clock that steps backwards must not throw the camera across the room,
//! so every delta is clamped into `[0, max_delta]`.

use std::time::Instant;

/// Default hitch cap in seconds. Past 0.1 s the friction step would
/// overshoot and reverse the velocity.
pub const DEFAULT_MAX_DELTA: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FrameClock {
    last_frame: Option<Instant>,
    max_delta: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DELTA)
    }
}

impl FrameClock {
    /// Create a clock. The first tick always returns 0.
    pub fn new(max_delta: f32) -> Self {
        Self {
            last_frame: None,
            max_delta: max_delta.max(0.0),
        }
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    /// Seconds since the previous tick, read from the system clock.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Seconds since the previous tick, using a caller-supplied instant.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let delta = match self.last_frame {
            // checked_duration_since: an earlier `now` yields zero, not a panic
            Some(last) => now
                .checked_duration_since(last)
                .map_or(0.0, |elapsed| elapsed.as_secs_f32()),
            None => 0.0,
        };
        self.last_frame = Some(now);
        self.clamp(delta)
    }

    /// Forget the previous frame, e.g. after the loop was paused.
    pub fn reset(&mut self) {
        self.last_frame = None;
    }

    /// Clamp a raw delta into the usable range.
    pub fn clamp(&self, delta: f32) -> f32 {
        if delta.is_finite() {
            delta.clamp(0.0, self.max_delta)
        } else {
            0.0
        }
    }
}
