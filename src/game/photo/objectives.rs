//! Photo Objectives
//!
//! Per-level photographic goals and the validator that checks a capture
//! against them. A single ray through the center of the lens decides which
//! object was photographed; the first uncompleted objective targeting that
//! object and passing its distance, angle and focus thresholds completes.
//! Completion is monotonic until the level is reloaded.

use serde::{Deserialize, Serialize};

use super::metadata::PhotoMetadata;
use crate::camera::{Pose, Ray};
use crate::game::config::ObjectiveConfig;
use crate::services::{AudioSink, play_optional};
use crate::world::{EntityId, Scene};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ObjectiveError {
    #[error("invalid level index {index} ({count} levels)")]
    InvalidLevel { index: usize, count: usize },
}

fn default_min_distance() -> f32 {
    1.0
}
fn default_max_distance() -> f32 {
    5.0
}
fn default_min_focus_accuracy() -> f32 {
    0.8
}
fn default_true() -> bool {
    true
}

/// One photographic goal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhotoObjective {
    pub name: String,
    pub target: EntityId,
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,
    #[serde(default = "default_max_distance")]
    pub max_distance: f32,
    #[serde(default = "default_min_focus_accuracy")]
    pub min_focus_accuracy: f32,
    /// Material shown on the target's "Secret" child once photographed
    #[serde(default)]
    pub secret_material: Option<String>,
    /// When false, any center hit on the target completes the objective
    #[serde(default = "default_true")]
    pub is_picture_required: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    completed: bool,
}

impl PhotoObjective {
    pub fn new(name: &str, target: EntityId) -> Self {
        Self {
            name: name.to_string(),
            target,
            min_distance: default_min_distance(),
            max_distance: default_max_distance(),
            min_focus_accuracy: default_min_focus_accuracy(),
            secret_material: None,
            is_picture_required: true,
            description: String::new(),
            completed: false,
        }
    }

    pub fn with_distance(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    pub fn with_min_focus_accuracy(mut self, accuracy: f32) -> Self {
        self.min_focus_accuracy = accuracy;
        self
    }

    pub fn with_secret_material(mut self, material: &str) -> Self {
        self.secret_material = Some(material.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn picture_optional(mut self) -> Self {
        self.is_picture_required = false;
        self
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

/// Ordered objectives for one level.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LevelObjectiveSet {
    pub level_name: String,
    pub objectives: Vec<PhotoObjective>,
}

impl LevelObjectiveSet {
    pub fn new(level_name: &str, objectives: Vec<PhotoObjective>) -> Self {
        Self {
            level_name: level_name.to_string(),
            objectives,
        }
    }
}

/// `1 - |1 - hit_distance / claimed_focus_distance|`
///
/// 1.0 when the focus distance matches the hit exactly, falling off linearly
/// as the two diverge.
pub fn focus_accuracy(hit_distance: f32, claimed_focus_distance: f32) -> f32 {
    if claimed_focus_distance <= 0.0 {
        return 0.0;
    }
    1.0 - (1.0 - hit_distance / claimed_focus_distance).abs()
}

pub struct ObjectiveValidator {
    levels: Vec<LevelObjectiveSet>,
    current: Option<usize>,
    max_angle_to_target: f32,
    completion_clip: Option<String>,
}

impl ObjectiveValidator {
    /// Build a validator and load the first level, if any.
    pub fn new(levels: Vec<LevelObjectiveSet>, config: &ObjectiveConfig) -> Self {
        let mut validator = Self {
            levels,
            current: None,
            max_angle_to_target: config.max_angle_to_target,
            completion_clip: config.completion_clip.clone(),
        };
        if !validator.levels.is_empty() {
            let _ = validator.load_level(0);
        }
        validator
    }

    pub fn levels(&self) -> &[LevelObjectiveSet] {
        &self.levels
    }

    pub fn current_level_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_level(&self) -> Option<&LevelObjectiveSet> {
        self.current.and_then(|i| self.levels.get(i))
    }

    pub fn max_angle_to_target(&self) -> f32 {
        self.max_angle_to_target
    }

    /// Make `index` the current level and reset its completion flags.
    pub fn load_level(&mut self, index: usize) -> Result<(), ObjectiveError> {
        let count = self.levels.len();
        let Some(level) = self.levels.get_mut(index) else {
            tracing::error!(index, count, "invalid level index");
            return Err(ObjectiveError::InvalidLevel { index, count });
        };
        for objective in &mut level.objectives {
            objective.completed = false;
        }
        tracing::info!(level = %level.level_name, "loaded objectives");
        self.current = Some(index);
        Ok(())
    }

    /// Check a capture against the current level. At most one objective
    /// completes per call.
    pub fn validate(
        &mut self,
        lens: &Pose,
        scene: &mut dyn Scene,
        metadata: &PhotoMetadata,
        audio: &mut dyn AudioSink,
    ) -> bool {
        let Some(index) = self.current else {
            return false;
        };
        let ray = Ray::through_viewport_center(lens);
        let Some(hit) = scene.raycast(&ray, f32::INFINITY) else {
            return false;
        };
        let max_angle = self.max_angle_to_target;
        let Some(level) = self.levels.get_mut(index) else {
            return false;
        };

        let mut completed = false;
        for objective in level.objectives.iter_mut() {
            if objective.completed || objective.target != hit.entity {
                continue;
            }

            if !objective.is_picture_required {
                objective.completed = true;
                tracing::info!(objective = %objective.name, "objective completed");
                completed = true;
                break;
            }

            let to_hit = hit.point - lens.position;
            let distance = to_hit.length();
            if distance < objective.min_distance || distance > objective.max_distance {
                continue;
            }

            let angle = lens.forward().angle_between(to_hit.normalize_or_zero()).to_degrees();
            if angle > max_angle {
                continue;
            }

            let accuracy = focus_accuracy(hit.distance, metadata.focus_distance);
            if accuracy < objective.min_focus_accuracy {
                tracing::debug!(objective = %objective.name, accuracy, "photo out of focus");
                continue;
            }

            objective.completed = true;
            tracing::info!(objective = %objective.name, distance, accuracy, "objective completed");
            if let Some(material) = objective.secret_material.as_deref() {
                scene.reveal_secret(hit.entity, material);
            }
            play_optional(audio, self.completion_clip.as_deref(), 1.0);
            completed = true;
            break;
        }

        if completed {
            self.after_completion();
        }
        completed
    }

    fn after_completion(&self) {
        if self.is_level_complete() {
            if let Some(level) = self.current_level() {
                tracing::info!(level = %level.level_name, "level completed");
            }
        }
    }

    /// Whether every picture-required objective in the current level is done.
    pub fn is_level_complete(&self) -> bool {
        self.current_level().is_some_and(|level| {
            level
                .objectives
                .iter()
                .filter(|o| o.is_picture_required)
                .all(|o| o.completed)
        })
    }

    /// Secret material of the first completed objective that carries one.
    pub fn completed_secret_material(&self) -> Option<&str> {
        self.current_level()?
            .objectives
            .iter()
            .find(|o| o.completed && o.secret_material.is_some())
            .and_then(|o| o.secret_material.as_deref())
    }

    /// Checklist of picture-required objectives for the HUD.
    pub fn objectives_display(&self) -> String {
        let Some(level) = self.current_level() else {
            return String::new();
        };
        let mut text = format!("{}\n\n", level.level_name);
        for objective in level.objectives.iter().filter(|o| o.is_picture_required) {
            let mark = if objective.completed { "[X]" } else { "[ ]" };
            text.push_str(&format!("{mark} {}\n", objective.description));
        }
        text
    }
}
