//! Keyboard Input Module
//!
//! Contains per-frame keyboard state: which keys are held, which went down
//! or up this frame, and the characters typed this frame.
//! Decoupled from any windowing system to use generic key codes.

use std::collections::HashSet;

/// Generic key codes, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,
    Space,
    ShiftLeft,
    ShiftRight,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Control keys
    Escape,
    Enter,
    Tab,
    Backspace,
    ControlLeft,
    ControlRight,

    // Letter keys used by camera, board and interaction bindings
    E,
    F,
    Q,
    R,
    X,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Tracks the current state of movement keys.
///
/// This struct maintains which movement keys are currently held,
/// allowing smooth continuous movement when keys are held down.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementKeys {
    /// W key - move forward
    pub forward: bool,
    /// S key - move backward
    pub backward: bool,
    /// A key - strafe left
    pub left: bool,
    /// D key - strafe right
    pub right: bool,
    /// Shift - run
    pub sprint: bool,
}

impl MovementKeys {
    /// Create a new movement keys state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update movement state based on key press/release.
    ///
    /// Returns `true` if the key was a movement key and was handled,
    /// `false` otherwise.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        match key {
            KeyCode::W => {
                self.forward = pressed;
                true
            }
            KeyCode::S => {
                self.backward = pressed;
                true
            }
            KeyCode::A => {
                self.left = pressed;
                true
            }
            KeyCode::D => {
                self.right = pressed;
                true
            }
            KeyCode::ShiftLeft | KeyCode::ShiftRight => {
                self.sprint = pressed;
                true
            }
            _ => false,
        }
    }

    /// Check if any directional key is currently held.
    pub fn any_pressed(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Check if sprint key is currently held.
    pub fn is_sprinting(&self) -> bool {
        self.sprint
    }

    /// Get the forward/backward movement direction (-1, 0, or 1).
    pub fn forward_axis(&self) -> f32 {
        (self.forward as i32 - self.backward as i32) as f32
    }

    /// Get the left/right movement direction (-1, 0, or 1).
    pub fn right_axis(&self) -> f32 {
        (self.right as i32 - self.left as i32) as f32
    }
}

/// Complete keyboard state for one frame.
///
/// `handle_key` records edges; `end_frame` clears them (and the typed text)
/// so the next frame starts with only the held set.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    /// Movement key states
    pub movement: MovementKeys,
    held: HashSet<KeyCode>,
    pressed: HashSet<KeyCode>,
    released: HashSet<KeyCode>,
    typed: String,
}

impl KeyboardState {
    /// Create a new keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press or release event.
    ///
    /// Key repeat (a press for a key that is already held) does not produce
    /// a new just-pressed edge.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        self.movement.handle_key(key, pressed);
        if pressed {
            if self.held.insert(key) {
                self.pressed.insert(key);
            }
        } else if self.held.remove(&key) {
            self.released.insert(key);
        }
    }

    /// Append characters produced by the platform text input this frame.
    ///
    /// Backspace arrives as `'\b'`, Enter as `'\r'` or `'\n'`.
    pub fn push_text(&mut self, text: &str) {
        self.typed.push_str(text);
    }

    /// Whether the key is held down.
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Whether the key went down this frame.
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Whether the key went up this frame.
    pub fn just_released(&self, key: KeyCode) -> bool {
        self.released.contains(&key)
    }

    /// Characters typed this frame, in order.
    pub fn typed_text(&self) -> &str {
        &self.typed
    }

    /// Drop this frame's edges and typed text.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
        self.typed.clear();
    }

    /// Reset all keyboard state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
