//! Input Bindings Module
//!
//! Maps logical actions to physical keys, allowing key remapping without
//! touching gameplay code. Several actions may share a key because they live
//! in different contexts (Q cycles aperture with the viewfinder raised and
//! rotates a photo on the board).

use std::collections::HashMap;

use super::KeyCode;

/// Logical input actions that can be bound to physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move forward (default: W)
    MoveForward,
    /// Move backward (default: S)
    MoveBack,
    /// Strafe left (default: A)
    MoveLeft,
    /// Strafe right (default: D)
    MoveRight,
    /// Run modifier (default: Shift)
    Sprint,
    /// Jump (default: Space)
    Jump,
    /// Interact with objects (default: E)
    Interact,
    /// Leave terminal / examination (default: Escape)
    Escape,
    /// Cycle aperture stop (default: Q)
    CycleAperture,
    /// Cycle shutter speed (default: R)
    CycleShutter,
    /// Cycle focal length (default: F)
    CycleFocalLength,
    /// Rotate selected board photo counter-clockwise (default: Q)
    RotatePhotoLeft,
    /// Rotate selected board photo clockwise (default: E)
    RotatePhotoRight,
    /// Toggle photo examination (default: X)
    ExaminePhoto,
    /// Arrange board photos in a grid (default: Tab)
    ArrangeBoard,
    /// Scroll text up (default: ArrowUp)
    ScrollUp,
    /// Scroll text down (default: ArrowDown)
    ScrollDown,
}

/// Maps logical actions to physical keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    action_to_key: HashMap<InputAction, KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Create a new KeyBindings instance with default key mappings.
    pub fn new() -> Self {
        let mut bindings = Self {
            action_to_key: HashMap::new(),
        };

        bindings.bind(InputAction::MoveForward, KeyCode::W);
        bindings.bind(InputAction::MoveBack, KeyCode::S);
        bindings.bind(InputAction::MoveLeft, KeyCode::A);
        bindings.bind(InputAction::MoveRight, KeyCode::D);
        bindings.bind(InputAction::Sprint, KeyCode::ShiftLeft);
        bindings.bind(InputAction::Jump, KeyCode::Space);
        bindings.bind(InputAction::Interact, KeyCode::E);
        bindings.bind(InputAction::Escape, KeyCode::Escape);
        bindings.bind(InputAction::CycleAperture, KeyCode::Q);
        bindings.bind(InputAction::CycleShutter, KeyCode::R);
        bindings.bind(InputAction::CycleFocalLength, KeyCode::F);
        bindings.bind(InputAction::RotatePhotoLeft, KeyCode::Q);
        bindings.bind(InputAction::RotatePhotoRight, KeyCode::E);
        bindings.bind(InputAction::ExaminePhoto, KeyCode::X);
        bindings.bind(InputAction::ArrangeBoard, KeyCode::Tab);
        bindings.bind(InputAction::ScrollUp, KeyCode::ArrowUp);
        bindings.bind(InputAction::ScrollDown, KeyCode::ArrowDown);

        bindings
    }

    /// Bind a logical action to a physical key, replacing any previous key.
    pub fn bind(&mut self, action: InputAction, key: KeyCode) {
        self.action_to_key.insert(action, key);
    }

    /// Remove the binding for a specific action.
    pub fn unbind(&mut self, action: InputAction) {
        self.action_to_key.remove(&action);
    }

    /// Get the key bound to a logical action, if any.
    pub fn get_key(&self, action: InputAction) -> Option<KeyCode> {
        self.action_to_key.get(&action).copied()
    }
}
