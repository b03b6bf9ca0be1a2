//! FPS Camera Controller Module
//!
//! First-person look: mouse motion turns the body (yaw) and tilts the head
//! (pitch) with no button held. Horizontal motion also adds a small roll
//! ("sway") that springs back as soon as the mouse stops.
//!
//! Key features:
//! - Direct mouse input → camera rotation
//! - Sensitivity in degrees per motion unit (default: 2)
//! - Pitch clamped to ±max_look_angle (default: 85 degrees)

use glam::{Quat, Vec3};

/// Default look limit in degrees.
pub const DEFAULT_MAX_LOOK_ANGLE: f32 = 85.0;

/// FPS Camera Controller
///
/// ## Usage
/// ```rust,ignore
/// let mut look = FPSCameraController::new();
/// look.apply_mouse_delta(input.mouse.motion.x, input.mouse.motion.y);
/// let rotation = look.rotation();
/// ```
#[derive(Clone, Debug)]
pub struct FPSCameraController {
    /// Horizontal angle (degrees), positive turns right, unrestricted
    pub yaw: f32,
    /// Vertical angle (degrees), positive looks up, clamped to ±max_look_angle
    pub pitch: f32,
    /// Roll from the last horizontal motion (degrees)
    pub tilt: f32,
    /// Degrees per motion unit
    pub sensitivity: f32,
    /// Roll degrees per degree of yaw this frame
    pub sway_amount: f32,
    max_look_angle: f32,
}

impl Default for FPSCameraController {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            tilt: 0.0,
            sensitivity: 2.0,
            sway_amount: 0.5,
            max_look_angle: DEFAULT_MAX_LOOK_ANGLE,
        }
    }
}

impl FPSCameraController {
    /// Create a new FPS camera controller with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller with custom sensitivity and look limit
    pub fn with_limits(sensitivity: f32, max_look_angle: f32) -> Self {
        Self {
            sensitivity,
            max_look_angle: max_look_angle.abs(),
            ..Default::default()
        }
    }

    /// Apply mouse movement delta to rotate the camera
    ///
    /// # Arguments
    /// * `dx` - Horizontal motion. Positive = look right (increase yaw)
    /// * `dy` - Vertical motion, device convention. Positive = look down
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32) {
        let yaw_delta = dx * self.sensitivity;
        self.yaw += yaw_delta;
        self.pitch = (self.pitch - dy * self.sensitivity).clamp(-self.max_look_angle, self.max_look_angle);
        self.tilt = yaw_delta * self.sway_amount;
    }

    /// Body rotation (yaw only), used for movement directions.
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw.to_radians())
    }

    /// Full head rotation: yaw, then pitch, then sway roll.
    pub fn rotation(&self) -> Quat {
        self.body_rotation()
            * Quat::from_rotation_x(self.pitch.to_radians())
            * Quat::from_rotation_z(-self.tilt.to_radians())
    }

    /// Horizontal forward direction (XZ plane).
    pub fn flat_forward(&self) -> Vec3 {
        self.body_rotation() * Vec3::NEG_Z
    }

    /// Horizontal right direction (XZ plane).
    pub fn flat_right(&self) -> Vec3 {
        self.body_rotation() * Vec3::X
    }

    pub fn max_look_angle(&self) -> f32 {
        self.max_look_angle
    }
}
