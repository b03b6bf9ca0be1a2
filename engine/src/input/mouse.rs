//! Mouse Input Module
//!
//! Contains mouse state tracking for position, buttons, look motion and the
//! scroll wheel. Decoupled from any windowing system to use generic types.

/// Mouse button identifiers, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button ("Fire1"): take photo, pick up photo
    Left,
    Middle,
    /// Secondary button ("Fire2"): raise viewfinder, rotate examined photo
    Right,
}

/// State of all mouse buttons, with this frame's edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonState {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
    pressed: [bool; 3],
    released: [bool; 3],
}

fn slot(button: MouseButton) -> usize {
    match button {
        MouseButton::Left => 0,
        MouseButton::Middle => 1,
        MouseButton::Right => 2,
    }
}

impl ButtonState {
    /// Create a new button state with all buttons released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update button state for a specific button, recording the edge.
    pub fn set(&mut self, button: MouseButton, pressed: bool) {
        let was = self.is_pressed(button);
        match button {
            MouseButton::Left => self.left = pressed,
            MouseButton::Middle => self.middle = pressed,
            MouseButton::Right => self.right = pressed,
        }
        if pressed && !was {
            self.pressed[slot(button)] = true;
        } else if !pressed && was {
            self.released[slot(button)] = true;
        }
    }

    /// Check if any button is held.
    pub fn any_pressed(&self) -> bool {
        self.left || self.middle || self.right
    }

    /// Check if a specific button is held.
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
        }
    }

    /// Whether the button went down this frame.
    pub fn just_pressed(&self, button: MouseButton) -> bool {
        self.pressed[slot(button)]
    }

    /// Whether the button went up this frame.
    pub fn just_released(&self, button: MouseButton) -> bool {
        self.released[slot(button)]
    }

    fn end_frame(&mut self) {
        self.pressed = [false; 3];
        self.released = [false; 3];
    }
}

/// 2D position, used for mouse coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create a new position.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Position {
    fn from(tuple: (f32, f32)) -> Self {
        Self { x: tuple.0, y: tuple.1 }
    }
}

/// Scroll wheel delta in lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollDelta {
    /// Horizontal scroll (positive = right)
    pub x: f32,
    /// Vertical scroll (positive = up/forward)
    pub y: f32,
}

impl ScrollDelta {
    /// Create from line delta (common for mouse wheels).
    pub fn from_lines(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create from pixel delta (common for trackpads).
    /// Normalizes by dividing by 100 to get approximate line equivalents.
    pub fn from_pixels(x: f64, y: f64) -> Self {
        Self {
            x: (x / 100.0) as f32,
            y: (y / 100.0) as f32,
        }
    }

    /// Check if there's any scroll movement.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Complete mouse state for one frame.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    /// Current cursor position in normalized UV coordinates (0.0 to 1.0).
    /// Origin is bottom-left, Y increases upward.
    pub position: Option<Position>,

    /// Accumulated raw look motion this frame (device units, +y = down).
    pub motion: Position,

    /// Current button states.
    pub buttons: ButtonState,

    /// Scroll wheel delta accumulated this frame.
    pub scroll: ScrollDelta,
}

impl MouseState {
    /// Create a new mouse state with no position and all buttons released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update cursor position from raw pixel coordinates (origin at top).
    pub fn set_position(&mut self, x: f64, y: f64, window_width: u32, window_height: u32) {
        let norm_x = x as f32 / window_width as f32;
        let norm_y = 1.0 - (y as f32 / window_height as f32); // Flip Y
        self.position = Some(Position::new(norm_x, norm_y));
    }

    /// Accumulate relative look motion.
    pub fn add_motion(&mut self, dx: f32, dy: f32) {
        self.motion.x += dx;
        self.motion.y += dy;
    }

    /// Handle a mouse button press/release event.
    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        self.buttons.set(button, pressed);
    }

    /// Accumulate a scroll wheel event.
    pub fn add_scroll(&mut self, delta: ScrollDelta) {
        self.scroll.x += delta.x;
        self.scroll.y += delta.y;
    }

    /// Drop this frame's motion, scroll and button edges.
    pub fn end_frame(&mut self) {
        self.motion = Position::default();
        self.scroll = ScrollDelta::default();
        self.buttons.end_frame();
    }

    /// Reset all mouse state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
