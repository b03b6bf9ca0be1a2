//! Doors
//!
//! A hinged door swings `open_angle` degrees around its local Z axis and
//! eases toward the target rotation every frame. A locked door needs a key
//! from the interactor's inventory first; unlocking spends one use of it
//! and opens the door on the same press.

use glam::{Quat, Vec3};

use super::{Interactable, Interactor};
use crate::camera::Pose;

pub const DEFAULT_OPEN_ANGLE: f32 = 90.0;
pub const DEFAULT_OPEN_SPEED: f32 = 2.0;

#[derive(Clone, Debug)]
pub struct Door {
    pub pose: Pose,
    closed_rotation: Quat,
    open_rotation: Quat,
    open_speed: f32,
    is_open: bool,
}

impl Door {
    pub fn new(pose: Pose) -> Self {
        Self::with_swing(pose, DEFAULT_OPEN_ANGLE, DEFAULT_OPEN_SPEED)
    }

    pub fn with_swing(pose: Pose, open_angle: f32, open_speed: f32) -> Self {
        Self {
            closed_rotation: pose.rotation,
            open_rotation: pose.rotation * Quat::from_rotation_z(open_angle.to_radians()),
            pose,
            open_speed,
            is_open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
        tracing::debug!(open = self.is_open, "door toggled");
    }

    pub fn target_rotation(&self) -> Quat {
        if self.is_open {
            self.open_rotation
        } else {
            self.closed_rotation
        }
    }

    /// Ease the leaf toward its target rotation.
    pub fn update(&mut self, dt: f32) {
        let t = (dt * self.open_speed).clamp(0.0, 1.0);
        self.pose.rotation = self.pose.rotation.slerp(self.target_rotation(), t);
    }
}

impl Interactable for Door {
    fn prompt(&self) -> &str {
        if self.is_open { "Close" } else { "Open" }
    }

    fn position(&self) -> Vec3 {
        self.pose.position
    }

    fn interact(&mut self, _interactor: &mut Interactor<'_>) {
        self.toggle();
    }
}

#[derive(Clone, Debug)]
pub struct LockedDoor {
    pub door: Door,
    required_key: String,
    locked: bool,
}

impl LockedDoor {
    pub fn new(door: Door, required_key: &str) -> Self {
        Self {
            door,
            required_key: required_key.to_string(),
            locked: true,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn update(&mut self, dt: f32) {
        self.door.update(dt);
    }
}

impl Interactable for LockedDoor {
    fn prompt(&self) -> &str {
        if self.locked { "Locked" } else { self.door.prompt() }
    }

    fn position(&self) -> Vec3 {
        self.door.position()
    }

    fn interact(&mut self, interactor: &mut Interactor<'_>) {
        if self.locked && interactor.inventory.use_key(&self.required_key) {
            self.locked = false;
            tracing::info!(key = %self.required_key, "door unlocked");
        }
        if !self.locked {
            self.door.toggle();
        }
    }
}
