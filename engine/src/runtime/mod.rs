//! Runtime Module
//!
//! Frame timing and the cancellable per-frame task the viewer drives from
//! its redraw callback.

pub mod frame_clock;
pub mod frame_loop;

pub use frame_clock::{DEFAULT_MAX_DELTA, FrameClock};
pub use frame_loop::{FrameHandle, FrameLoop};
