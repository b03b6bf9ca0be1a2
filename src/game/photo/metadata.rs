//! Photo Metadata
//!
//! Snapshot of the exposure and lens pose at the moment the shutter fired.
//! Serialized as the JSON sidecar next to each stored image.

use chrono::{DateTime, Local};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::exposure::ExposureSettings;
use crate::camera::Pose;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotoMetadata {
    pub timestamp: DateTime<Local>,
    pub aperture: f32,
    pub shutter_speed: f32,
    pub focal_length: f32,
    pub focus_distance: f32,
    pub exposure_value: f32,
    pub position: Vec3,
    pub rotation: Quat,
}

impl PhotoMetadata {
    pub fn capture(settings: &ExposureSettings, pose: &Pose, timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            aperture: settings.aperture(),
            shutter_speed: settings.shutter_speed(),
            focal_length: settings.focal_length(),
            focus_distance: settings.focus_distance(),
            exposure_value: settings.exposure_value(),
            position: pose.position,
            rotation: pose.rotation,
        }
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation)
    }

    /// One-line description for photo info panels.
    pub fn summary(&self) -> String {
        format!(
            "{}  f/{}  1/{}s  {}mm  focus {:.2}m  EV {:.2}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.aperture,
            self.shutter_speed,
            self.focal_length,
            self.focus_distance,
            self.exposure_value,
        )
    }
}
