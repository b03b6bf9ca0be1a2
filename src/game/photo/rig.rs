//! Camera Viewmodel Rig
//!
//! Places the held camera relative to the player's eye. The rig eases
//! between the hip and raised offsets, pulls back when the raised position
//! would clip into geometry, and sways while walking.

use glam::Vec3;

use crate::camera::{Pose, Ray};
use crate::game::config::CameraConfig;
use crate::world::Scene;

const BOB_LERP_SPEED: f32 = 6.0;
const SPRINT_BOB_MULTIPLIER: f32 = 1.2;

#[derive(Clone, Debug)]
pub struct ViewmodelRig {
    default_position: Vec3,
    zoomed_position: Vec3,
    zoom_position_speed: f32,
    min_collision_distance: f32,
    pullback_factor: f32,
    amplitude: f32,
    bob_speed: f32,

    offset: Vec3,
    bob_timer: f32,
    bob_amount: f32,
    blocked: bool,
}

impl ViewmodelRig {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            default_position: config.default_position,
            zoomed_position: config.zoomed_position,
            zoom_position_speed: config.zoom_position_speed,
            min_collision_distance: config.min_collision_distance,
            pullback_factor: config.collision_pullback_factor,
            amplitude: config.movement_amplitude,
            bob_speed: config.movement_speed,
            offset: config.default_position,
            bob_timer: 0.0,
            bob_amount: 0.0,
            blocked: false,
        }
    }

    /// Whether the eye-to-camera path is obstructed. Hits closer than the
    /// minimum collision distance are ignored.
    pub fn is_blocked(&self, eye: &Pose, local_target: Vec3, scene: &dyn Scene) -> bool {
        let to_target = eye.transform_point(local_target) - eye.position;
        let distance = to_target.length();
        if distance <= f32::EPSILON {
            return false;
        }
        scene
            .raycast(&Ray::new(eye.position, to_target), distance)
            .is_some_and(|hit| hit.distance >= self.min_collision_distance)
    }

    pub fn update(
        &mut self,
        dt: f32,
        zoomed: bool,
        moving: bool,
        sprinting: bool,
        eye: &Pose,
        scene: &dyn Scene,
    ) {
        let mut target = if zoomed {
            self.zoomed_position
        } else {
            self.default_position
        };
        self.blocked = self.is_blocked(eye, target, scene);
        if self.blocked {
            target = self.default_position.lerp(target, self.pullback_factor);
        }
        self.offset = self
            .offset
            .lerp(target, (dt * self.zoom_position_speed).clamp(0.0, 1.0));

        let bob_target = match (moving, sprinting) {
            (false, _) => 0.0,
            (true, false) => self.amplitude,
            (true, true) => self.amplitude * SPRINT_BOB_MULTIPLIER,
        };
        if moving {
            self.bob_timer += dt * self.bob_speed;
        }
        self.bob_amount += (bob_target - self.bob_amount) * (dt * BOB_LERP_SPEED).clamp(0.0, 1.0);
    }

    /// Walking sway, added on top of the eased offset.
    pub fn bob_offset(&self) -> Vec3 {
        Vec3::new(
            (self.bob_timer * 0.5).cos() * self.bob_amount * 0.5,
            self.bob_timer.sin() * self.bob_amount,
            0.0,
        )
    }

    /// Camera position relative to the eye, sway included.
    pub fn local_offset(&self) -> Vec3 {
        self.offset + self.bob_offset()
    }

    pub fn world_pose(&self, eye: &Pose) -> Pose {
        Pose::new(eye.transform_point(self.local_offset()), eye.rotation)
    }

    /// The viewfinder is hidden while the raised camera is clipping.
    pub fn is_clipping(&self) -> bool {
        self.blocked
    }
}
