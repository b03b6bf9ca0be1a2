//! First-Person Player Controller
//!
//! Walks, runs and jumps on a flat ground height supplied by the host, turns
//! with the mouse, bobs the head while walking and plays a footstep at each
//! bob peak. Terminal and photo board sessions disable the controller so the
//! player stays put while the camera is borrowed.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::RngCore;
use rand::seq::SliceRandom;

use crate::camera::{FPSCameraController, Pose};
use crate::game::config::PlayerConfig;
use crate::input::{InputAction, InputState};
use crate::services::AudioSink;

/// Downward velocity held while grounded so the body stays snapped.
const GROUNDED_VELOCITY: f32 = -1.0;
const SPRINT_BOB_SCALE: f32 = 1.2;

pub struct PlayerController {
    config: PlayerConfig,
    /// Feet position
    pub position: Vec3,
    pub look: FPSCameraController,
    vertical_velocity: f32,
    grounded: bool,
    enabled: bool,

    bob_timer: f32,
    bob_amount: f32,
    /// Current vertical eye offset from bob
    eye_offset: f32,
    time: f32,
    last_footstep: Option<f32>,
}

impl PlayerController {
    pub fn new(config: PlayerConfig, position: Vec3) -> Self {
        let mut look = FPSCameraController::with_limits(config.mouse_sensitivity, config.max_look_angle);
        look.sway_amount = config.sway_amount;
        Self {
            config,
            position,
            look,
            vertical_velocity: 0.0,
            grounded: false,
            enabled: true,
            bob_timer: 0.0,
            bob_amount: 0.0,
            eye_offset: 0.0,
            time: 0.0,
            last_footstep: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            tracing::debug!(enabled, "player controller");
        }
        self.enabled = enabled;
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn eye_position(&self) -> Vec3 {
        self.position + Vec3::Y * (self.config.eye_height + self.eye_offset)
    }

    pub fn eye_pose(&self) -> Pose {
        Pose::new(self.eye_position(), self.look.rotation())
    }

    /// Current head bob offset (meters).
    pub fn bob_offset(&self) -> f32 {
        self.eye_offset
    }

    /// Horizontal move for this frame's input, before speed is applied.
    /// Never longer than one.
    pub fn move_direction(&self, input: &InputState) -> Vec3 {
        let keys = &input.keyboard.movement;
        let x = keys.right_axis();
        let z = keys.forward_axis();
        let forward_scale = if z > 0.0 {
            self.config.forward_multiplier
        } else {
            self.config.backward_multiplier
        };
        let direction = self.look.flat_right() * x * self.config.sideways_multiplier
            + self.look.flat_forward() * z * forward_scale;
        direction.clamp_length_max(1.0)
    }

    pub fn update(
        &mut self,
        dt: f32,
        input: &InputState,
        ground_height: f32,
        audio: &mut dyn AudioSink,
        rng: &mut dyn RngCore,
    ) {
        self.time += dt;
        if !self.enabled {
            return;
        }
        self.update_movement(dt, input, ground_height);
        self.look.apply_mouse_delta(input.mouse.motion.x, input.mouse.motion.y);
        self.update_bob(dt, input, audio, rng);
    }

    fn update_movement(&mut self, dt: f32, input: &InputState, ground_height: f32) {
        let sprinting = input.keyboard.movement.is_sprinting();
        let mut speed = self.config.move_speed;
        if sprinting {
            speed *= self.config.run_multiplier;
        }
        let horizontal = self.move_direction(input) * speed;

        if self.grounded {
            self.vertical_velocity = GROUNDED_VELOCITY;
            if input.action_pressed(InputAction::Jump) {
                self.vertical_velocity = self.config.jump_force;
            }
        }
        self.vertical_velocity += self.config.gravity * dt;

        self.position += (horizontal + Vec3::Y * self.vertical_velocity) * dt;

        if self.position.y <= ground_height {
            self.position.y = ground_height;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }

    fn update_bob(&mut self, dt: f32, input: &InputState, audio: &mut dyn AudioSink, rng: &mut dyn RngCore) {
        let moving = input.is_moving();
        let sprinting = input.keyboard.movement.is_sprinting();

        let target = if !self.grounded || !moving {
            0.0
        } else if sprinting {
            self.config.bob_amount * SPRINT_BOB_SCALE
        } else {
            self.config.bob_amount
        };

        if self.grounded && moving {
            self.bob_timer += dt * self.config.bob_speed;

            let interval = if sprinting {
                self.config.base_footstep_interval * self.config.sprint_footstep_multiplier
            } else {
                self.config.base_footstep_interval
            };
            let rested = self.last_footstep.is_none_or(|t| self.time - t >= interval);
            if self.bob_timer > PI && rested {
                self.play_footstep(audio, rng);
                self.last_footstep = Some(self.time);
                self.bob_timer %= TAU;
            }
        }

        let blend = (dt * self.config.bob_transition_speed).clamp(0.0, 1.0);
        self.bob_amount += (target - self.bob_amount) * blend;
        let target_offset = self.bob_timer.sin() * self.bob_amount;
        self.eye_offset += (target_offset - self.eye_offset) * blend;
    }

    fn play_footstep(&self, audio: &mut dyn AudioSink, rng: &mut dyn RngCore) {
        if let Some(clip) = self.config.footstep_clips.choose(rng) {
            audio.play_once(clip, 1.0);
        }
    }
}
