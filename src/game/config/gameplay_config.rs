//! Gameplay Configuration
//!
//! Player movement, interaction reach, objective validation, photo board and
//! tutorial timing.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Objective validation tuning.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveConfig {
    /// Largest accepted angle between lens forward and the hit point (degrees)
    pub max_angle_to_target: f32,
    pub completion_clip: Option<String>,
}

impl Default for ObjectiveConfig {
    fn default() -> Self {
        Self {
            max_angle_to_target: 30.0,
            completion_clip: Some("objective_complete".into()),
        }
    }
}

/// First-person controller tuning.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub move_speed: f32,
    pub run_multiplier: f32,
    pub jump_force: f32,
    /// Vertical acceleration (negative is down)
    pub gravity: f32,
    pub forward_multiplier: f32,
    pub backward_multiplier: f32,
    pub sideways_multiplier: f32,
    pub mouse_sensitivity: f32,
    pub max_look_angle: f32,
    pub sway_amount: f32,
    pub eye_height: f32,
    pub bob_speed: f32,
    pub bob_amount: f32,
    pub bob_transition_speed: f32,
    pub base_footstep_interval: f32,
    pub sprint_footstep_multiplier: f32,
    pub footstep_clips: Vec<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 7.0,
            run_multiplier: 1.6,
            jump_force: 5.0,
            gravity: -20.0,
            forward_multiplier: 1.0,
            backward_multiplier: 0.6,
            sideways_multiplier: 0.8,
            mouse_sensitivity: 2.0,
            max_look_angle: 85.0,
            sway_amount: 0.5,
            eye_height: 1.6,
            bob_speed: 14.0,
            bob_amount: 0.05,
            bob_transition_speed: 6.0,
            base_footstep_interval: 0.5,
            sprint_footstep_multiplier: 0.8,
            footstep_clips: vec!["footstep_1".into(), "footstep_2".into(), "footstep_3".into()],
        }
    }
}

/// Interaction raycast tuning.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub raycast_distance: f32,
    /// Reach used by interactables that do not override it
    pub default_interaction_distance: f32,
    pub highlight_intensity: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            raycast_distance: 2.0,
            default_interaction_distance: 3.0,
            highlight_intensity: 0.3,
        }
    }
}

/// Photo board layout, handling and camera view.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub board_size: Vec2,
    /// Photos sit this far in front of the board surface
    pub pin_distance: f32,
    pub photo_scale: f32,
    /// Roll speed for Q/E (degrees/s)
    pub rotation_speed: f32,
    pub max_columns: usize,
    pub photo_spacing: f32,
    pub camera_transition_speed: f32,
    pub view_distance: f32,
    pub view_height: f32,
    pub examine_distance: f32,
    pub examine_offset: Vec3,
    /// Examination turn rate per unit of mouse motion (degrees/s)
    pub examine_rotation_speed: f32,
    pub examine_smooth_speed: f32,
    /// Vertical examination tilt limit (degrees)
    pub examine_pitch_limit: f32,
    /// Seconds to glide an examined photo back to its pin
    pub return_duration: f32,
    pub pickup_clip: Option<String>,
    pub drop_clip: Option<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            board_size: Vec2::new(2.0, 1.5),
            pin_distance: 0.1,
            photo_scale: 0.2,
            rotation_speed: 100.0,
            max_columns: 4,
            photo_spacing: 0.1,
            camera_transition_speed: 5.0,
            view_distance: 2.0,
            view_height: 1.5,
            examine_distance: 0.5,
            examine_offset: Vec3::new(0.0, 0.0, 0.0),
            examine_rotation_speed: 100.0,
            examine_smooth_speed: 10.0,
            examine_pitch_limit: 80.0,
            return_duration: 0.5,
            pickup_clip: Some("photo_pickup".into()),
            drop_clip: Some("photo_drop".into()),
        }
    }
}

/// Tutorial message timing and ambience fade.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorialConfig {
    pub display_duration: f32,
    pub fade_duration: f32,
    pub ambience_fade_in: f32,
    pub ambience_volume: f32,
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self {
            display_duration: 3.0,
            fade_duration: 0.5,
            ambience_fade_in: 2.0,
            ambience_volume: 0.15,
        }
    }
}
