//! Pointer Lock Module
//!
//! Owns the Inactive/Active state that gates first-person movement.
//! A click requests the lock; Escape, a host unlock, or losing window focus
//! releases it. The host applies the cursor grab only when the state is dirty.
//!
//! # Usage
//!
//! ```rust,ignore
//! use listening_room_engine::input::{PointerLock, LockAction};
//!
//! let mut lock = PointerLock::new();
//!
//! // Click on the view
//! if lock.request_lock() == LockAction::ApplyState {
//!     // grab + hide the cursor
//! }
//!
//! // Each frame
//! integrator.tick(delta, &keys, lock.is_active(), &mut camera, &obstacles);
//! ```

/// The two states of the pointer-lock controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    /// Cursor free, movement frozen (initial state)
    #[default]
    Inactive,
    /// Cursor captured, movement integrates every frame
    Active,
}

/// Actions that the PointerLock recommends after handling events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockAction {
    /// No action needed
    None,
    /// Apply cursor grab/visibility to the window
    ApplyState,
}

/// Pointer-lock controller.
#[derive(Debug, Clone, Default)]
pub struct PointerLock {
    state: LockState,
    /// Tracks if state changed and needs to be applied to the window
    state_dirty: bool,
}

impl PointerLock {
    /// Create a controller in the `Inactive` state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    /// `true` while the cursor is captured.
    pub fn is_active(&self) -> bool {
        self.state == LockState::Active
    }

    /// Check if the lock state needs to be applied to the window.
    pub fn is_dirty(&self) -> bool {
        self.state_dirty
    }

    /// Clear the dirty flag after applying state.
    pub fn clear_dirty(&mut self) {
        self.state_dirty = false;
    }

    /// Click/tap on the view: enter `Active`.
    pub fn request_lock(&mut self) -> LockAction {
        self.transition(LockState::Active)
    }

    /// Escape or host-initiated unlock: enter `Inactive`.
    pub fn release(&mut self) -> LockAction {
        self.transition(LockState::Inactive)
    }

    /// Losing focus always drops the lock, the way a browser does.
    pub fn handle_focus_lost(&mut self) -> LockAction {
        self.release()
    }

    /// Whether the cursor should be hidden and grabbed.
    pub fn should_cursor_be_grabbed(&self) -> bool {
        self.is_active()
    }

    /// Get a human-readable status message for the current lock state.
    pub fn status_message(&self) -> &'static str {
        match self.state {
            LockState::Active => "Walking. ESC to release cursor.",
            LockState::Inactive => "Paused. Click to walk.",
        }
    }

    fn transition(&mut self, next: LockState) -> LockAction {
        if self.state == next {
            return LockAction::None;
        }
        log::info!("pointer lock: {:?} -> {:?}", self.state, next);
        self.state = next;
        self.state_dirty = true;
        LockAction::ApplyState
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_inactive() {
        let lock = PointerLock::new();
        assert_eq!(lock.state(), LockState::Inactive);
        assert!(!lock.is_active());
        assert!(!lock.is_dirty());
    }

    #[test]
    fn test_click_locks_once() {
        let mut lock = PointerLock::new();

        assert_eq!(lock.request_lock(), LockAction::ApplyState);
        assert!(lock.is_active());
        assert!(lock.is_dirty());

        lock.clear_dirty();
        // Clicking again when already locked does nothing
        assert_eq!(lock.request_lock(), LockAction::None);
        assert!(!lock.is_dirty());
    }

    #[test]
    fn test_release_unlocks() {
        let mut lock = PointerLock::new();
        lock.request_lock();

        assert_eq!(lock.release(), LockAction::ApplyState);
        assert_eq!(lock.state(), LockState::Inactive);

        assert_eq!(lock.release(), LockAction::None);
    }

    #[test]
    fn test_focus_lost_releases() {
        let mut lock = PointerLock::new();
        lock.request_lock();

        assert_eq!(lock.handle_focus_lost(), LockAction::ApplyState);
        assert!(!lock.should_cursor_be_grabbed());
    }

    #[test]
    fn test_status_message() {
        let mut lock = PointerLock::new();
        assert!(lock.status_message().contains("Click"));

        lock.request_lock();
        assert!(lock.status_message().contains("ESC"));
    }
}
