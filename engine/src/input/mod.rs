//! Input Module
//!
//! Platform-agnostic input handling for the room viewer: held walk keys,
//! the pointer-lock gate, and scoped event listeners. Decoupled from winit
//! except for key-code translation.
//!
//! # Example
//!
//! ```rust,ignore
//! use listening_room_engine::input::{KeyboardState, KeyCode, PointerLock};
//!
//! let mut keyboard = KeyboardState::new();
//! let mut lock = PointerLock::new();
//!
//! lock.request_lock();
//! keyboard.handle_key(KeyCode::W, true);
//! if lock.is_active() && keyboard.movement.forward {
//!     // Walk forward
//! }
//! ```

pub mod keyboard;
pub mod listeners;
pub mod pointer_lock;

// Re-export commonly used types at module level
pub use keyboard::{KeyCode, KeyboardState, MovementKeys};
pub use listeners::{InputEvent, ListenerGuard, ListenerRegistry, WeakListenerRegistry};
pub use pointer_lock::{LockAction, LockState, PointerLock};

/// Combined input state consumed by the frame loop.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub pointer: PointerLock,
}

impl InputState {
    /// Create a new input state with all keys released and the pointer unlocked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one host event.
    ///
    /// Losing the lock also releases every held key so nothing keeps
    /// walking once the player gets the cursor back.
    pub fn apply(&mut self, event: &InputEvent) -> LockAction {
        match *event {
            InputEvent::KeyDown(key) => {
                self.keyboard.handle_key(key, true);
                LockAction::None
            }
            InputEvent::KeyUp(key) => {
                self.keyboard.handle_key(key, false);
                LockAction::None
            }
            InputEvent::Click => self.pointer.request_lock(),
            InputEvent::Escape => {
                self.keyboard.reset();
                self.pointer.release()
            }
            InputEvent::FocusLost => {
                self.keyboard.reset();
                self.pointer.handle_focus_lost()
            }
        }
    }

    /// Check if the player is trying to move right now.
    pub fn is_moving(&self) -> bool {
        self.pointer.is_active() && self.keyboard.movement.any_pressed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_state_default() {
        let input = InputState::new();
        assert!(!input.is_moving());
        assert!(!input.pointer.is_active());
    }

    #[test]
    fn test_keys_without_lock_are_not_moving() {
        let mut input = InputState::new();
        input.apply(&InputEvent::KeyDown(KeyCode::W));
        assert!(input.keyboard.movement.forward);
        assert!(!input.is_moving());

        assert_eq!(input.apply(&InputEvent::Click), LockAction::ApplyState);
        assert!(input.is_moving());
    }

    #[test]
    fn test_escape_releases_keys_and_lock() {
        let mut input = InputState::new();
        input.apply(&InputEvent::Click);
        input.apply(&InputEvent::KeyDown(KeyCode::D));

        assert_eq!(input.apply(&InputEvent::Escape), LockAction::ApplyState);
        assert!(!input.keyboard.movement.any_pressed());
        assert_eq!(input.pointer.state(), LockState::Inactive);
    }

    #[test]
    fn test_focus_lost_releases() {
        let mut input = InputState::new();
        input.apply(&InputEvent::Click);
        input.apply(&InputEvent::KeyDown(KeyCode::A));
        input.apply(&InputEvent::FocusLost);
        assert!(!input.is_moving());
        assert!(!input.keyboard.movement.left);
    }
}
