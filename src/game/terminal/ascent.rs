//! Rocket Ascent
//!
//! The terminal lifting off after the self-destruct countdown: it climbs
//! with constant acceleration, tumbles, and drags the camera's gaze along
//! until it reaches the ceiling height.

use glam::{EulerRot, Quat};

use crate::camera::{Pose, look_rotation};
use crate::game::config::SelfDestructConfig;

/// Tumble rate ratios per axis (x, y, z).
const TUMBLE_RATIO: (f32, f32, f32) = (1.0, 0.7, 0.5);

#[derive(Clone, Debug)]
pub struct RocketAscent {
    start_rotation: Quat,
    speed: f32,
    elapsed: f32,
    acceleration: f32,
    rotation_speed: f32,
    max_height: f32,
    camera_follow_speed: f32,
}

impl RocketAscent {
    pub fn new(config: &SelfDestructConfig, start_rotation: Quat) -> Self {
        Self {
            start_rotation,
            speed: config.lift_speed,
            elapsed: 0.0,
            acceleration: config.acceleration,
            rotation_speed: config.rotation_speed,
            max_height: config.max_rocket_height,
            camera_follow_speed: config.camera_follow_speed,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Advance one frame. Moves `body` and turns `camera` toward it.
    /// Returns false once the ceiling is reached (nothing is moved then).
    pub fn step(&mut self, dt: f32, body: &mut Pose, camera: Option<&mut Pose>) -> bool {
        if body.position.y >= self.max_height {
            return false;
        }

        self.elapsed += dt;
        self.speed += self.acceleration * dt;
        body.position.y += self.speed * dt;

        let angle = (self.rotation_speed * self.elapsed).to_radians();
        let tumble = Quat::from_euler(
            EulerRot::YXZ,
            angle * TUMBLE_RATIO.1,
            angle * TUMBLE_RATIO.0,
            angle * TUMBLE_RATIO.2,
        );
        body.rotation = self.start_rotation * tumble;

        if let Some(camera) = camera {
            let to_body = body.position - camera.position;
            if to_body.length_squared() > f32::EPSILON {
                let target = look_rotation(to_body, glam::Vec3::Y);
                let t = (dt * self.camera_follow_speed).clamp(0.0, 1.0);
                camera.rotation = camera.rotation.slerp(target, t);
            }
        }
        true
    }
}
