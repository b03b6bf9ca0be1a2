//! Terminal Display
//!
//! Cursor blink and text color. The rainbow secret mode cycles the hue of
//! the output text over time.

/// Phosphor green.
pub const TEXT_COLOR: [f32; 3] = [0.2, 0.8, 0.4];

#[derive(Clone, Debug)]
pub struct CursorBlink {
    rate: f32,
    timer: f32,
    visible: bool,
}

impl CursorBlink {
    pub fn new(rate: f32) -> Self {
        Self {
            rate,
            timer: 0.0,
            visible: true,
        }
    }

    /// Show the cursor and restart the blink period.
    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.visible = true;
    }

    pub fn tick(&mut self, dt: f32) {
        self.timer += dt;
        if self.timer >= self.rate {
            self.timer = 0.0;
            self.visible = !self.visible;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// HSV (all in `[0, 1]`) to linear RGB.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector as u32 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// Fully saturated color whose hue advances `speed` cycles per second.
pub fn rainbow_color(time: f32, speed: f32) -> [f32; 3] {
    hsv_to_rgb((time * speed).rem_euclid(1.0), 1.0, 1.0)
}
