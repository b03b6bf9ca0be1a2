//! Input Module
//!
//! Provides platform-agnostic, per-frame input snapshots for keyboard and
//! mouse. The host feeds events in, gameplay code polls the snapshot during
//! the tick, and the host calls [`InputState::end_frame`] afterwards.
//!
//! # Example
//!
//! ```rust,ignore
//! use shutterbug_engine::input::{InputState, InputAction, KeyCode, MouseButton};
//!
//! let mut input = InputState::new();
//! input.keyboard.handle_key(KeyCode::Q, true);
//! input.mouse.set_button(MouseButton::Right, true);
//!
//! if input.action_pressed(InputAction::CycleAperture) {
//!     // next f-stop
//! }
//! input.end_frame();
//! ```

pub mod bindings;
pub mod keyboard;
pub mod mouse;

pub use bindings::{InputAction, KeyBindings};
pub use keyboard::{KeyCode, KeyboardState, MovementKeys};
pub use mouse::{ButtonState, MouseButton, MouseState, Position, ScrollDelta};

/// Combined input state for both keyboard and mouse, plus the active bindings.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
    pub bindings: KeyBindings,
}

impl InputState {
    /// Create a new input state with all inputs in their default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the key bound to `action` went down this frame.
    pub fn action_pressed(&self, action: InputAction) -> bool {
        self.bindings
            .get_key(action)
            .is_some_and(|key| self.keyboard.just_pressed(key))
    }

    /// Whether the key bound to `action` is held.
    pub fn action_held(&self, action: InputAction) -> bool {
        self.bindings
            .get_key(action)
            .is_some_and(|key| self.keyboard.is_held(key))
    }

    /// Whether any directional movement input is active.
    pub fn is_moving(&self) -> bool {
        self.keyboard.movement.any_pressed()
    }

    /// Clear per-frame edges, motion, scroll and typed text.
    pub fn end_frame(&mut self) {
        self.keyboard.end_frame();
        self.mouse.end_frame();
    }

    /// Reset all input state to defaults, keeping bindings.
    pub fn reset(&mut self) {
        self.keyboard.reset();
        self.mouse.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_state_default() {
        let input = InputState::new();
        assert!(!input.is_moving());
        assert!(!input.action_pressed(InputAction::Interact));
    }

    #[test]
    fn test_action_pressed_uses_bindings() {
        let mut input = InputState::new();
        input.keyboard.handle_key(KeyCode::E, true);
        assert!(input.action_pressed(InputAction::Interact));
        assert!(input.action_held(InputAction::RotatePhotoRight));

        input.end_frame();
        assert!(!input.action_pressed(InputAction::Interact));
        assert!(input.action_held(InputAction::Interact));
    }

    #[test]
    fn test_input_state_keyboard_movement() {
        let mut input = InputState::new();
        input.keyboard.handle_key(KeyCode::W, true);
        assert!(input.is_moving());
    }
}
