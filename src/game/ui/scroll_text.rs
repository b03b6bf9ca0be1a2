//! Scrollable Text
//!
//! Vertical offset for a credits-style text block. Scrolls up on its own or
//! with the arrow keys, and wraps back to the lower limit once it passes the
//! upper one.

use crate::input::{InputAction, InputState};

#[derive(Clone, Debug)]
pub struct ScrollableText {
    pub offset: f32,
    /// Units per second
    pub scroll_speed: f32,
    pub upper_limit: f32,
    pub lower_limit: f32,
    pub auto_scroll: bool,
}

impl Default for ScrollableText {
    fn default() -> Self {
        Self {
            offset: 0.0,
            scroll_speed: 50.0,
            upper_limit: 500.0,
            lower_limit: 0.0,
            auto_scroll: true,
        }
    }
}

impl ScrollableText {
    pub fn update(&mut self, dt: f32, input: &InputState) {
        let step = self.scroll_speed * dt;
        if self.auto_scroll {
            self.offset += step;
        } else if input.action_held(InputAction::ScrollUp) {
            self.offset += step;
        } else if input.action_held(InputAction::ScrollDown) {
            self.offset -= step;
        }

        if self.offset > self.upper_limit {
            self.offset = self.lower_limit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;

    #[test]
    fn test_auto_scroll_wraps() {
        let mut text = ScrollableText::default();
        let input = InputState::new();
        text.update(5.0, &input);
        assert_eq!(text.offset, 250.0);
        text.update(5.1, &input);
        assert_eq!(text.offset, 0.0);
    }

    #[test]
    fn test_manual_scroll() {
        let mut text = ScrollableText {
            auto_scroll: false,
            ..Default::default()
        };
        let mut input = InputState::new();
        text.update(1.0, &input);
        assert_eq!(text.offset, 0.0);

        input.keyboard.handle_key(KeyCode::ArrowUp, true);
        text.update(1.0, &input);
        assert_eq!(text.offset, 50.0);

        input.keyboard.handle_key(KeyCode::ArrowUp, false);
        input.keyboard.handle_key(KeyCode::ArrowDown, true);
        text.update(2.0, &input);
        assert_eq!(text.offset, -50.0);
    }
}
