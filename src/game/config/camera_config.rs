//! Camera Configuration
//!
//! Exposure tables, film, render resolutions, flash and viewmodel tuning for
//! the handheld photo camera.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{ConfigError, positive};

/// Audio clips the photo camera plays.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraClips {
    pub shutter: Option<String>,
    pub equip: Option<String>,
    pub focus: Option<String>,
    pub film_advance: Option<String>,
}

impl Default for CameraClips {
    fn default() -> Self {
        Self {
            shutter: Some("camera_shutter".into()),
            equip: Some("camera_equip".into()),
            focus: Some("camera_focus".into()),
            film_advance: Some("film_advance".into()),
        }
    }
}

/// Photo camera tuning.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// f-numbers, cycled with Q
    pub aperture_stops: Vec<f32>,
    /// Shutter speed denominators (1/N s), cycled with R
    pub shutter_speeds: Vec<f32>,
    /// Focal lengths in mm, cycled with F
    pub focal_lengths: Vec<f32>,
    /// Focus distance change per scroll unit
    pub focus_speed: f32,
    /// Starting focus distance (meters)
    pub initial_focus_distance: f32,
    pub max_focus_distance: f32,
    pub max_film_count: u32,
    /// Keys into the lens behavior registry, applied in order
    pub lens_behaviors: Vec<String>,
    /// Lens offset inside the camera model
    pub lens_position: Vec3,
    pub viewfinder_resolution: (u32, u32),
    pub photo_resolution: (u32, u32),
    pub flash_intensity: f32,
    /// Seconds the flash stays lit
    pub flash_duration: f32,
    /// Upper clamp for the zoomed field of view
    pub max_zoom_fov: f32,
    /// Player camera field of view blend rate while zooming
    pub zoom_speed: f32,
    /// Viewmodel offset from the eye when lowered
    pub default_position: Vec3,
    /// Viewmodel offset from the eye when raised to the eye
    pub zoomed_position: Vec3,
    pub zoom_position_speed: f32,
    /// Hits closer than this are ignored by the viewmodel clipping check
    pub min_collision_distance: f32,
    /// How far toward the zoomed offset a blocked viewmodel may move
    pub collision_pullback_factor: f32,
    pub movement_amplitude: f32,
    pub movement_speed: f32,
    pub clips: CameraClips,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aperture_stops: vec![1.4, 2.0, 2.8, 4.0, 5.6, 8.0, 11.0, 16.0],
            shutter_speeds: vec![1000.0, 500.0, 250.0, 125.0, 60.0, 30.0, 15.0],
            focal_lengths: vec![35.0, 50.0, 85.0],
            focus_speed: 5.0,
            initial_focus_distance: 2.0,
            max_focus_distance: 10.0,
            max_film_count: 24,
            lens_behaviors: Vec::new(),
            lens_position: Vec3::ZERO,
            viewfinder_resolution: (512, 512),
            photo_resolution: (1920, 1080),
            flash_intensity: 2.0,
            flash_duration: 0.1,
            max_zoom_fov: 85.0,
            zoom_speed: 15.0,
            default_position: Vec3::new(0.4, -0.3, -0.5),
            zoomed_position: Vec3::new(0.0, -0.2, -0.3),
            zoom_position_speed: 10.0,
            min_collision_distance: 0.2,
            collision_pullback_factor: 0.2,
            movement_amplitude: 0.02,
            movement_speed: 14.0,
            clips: CameraClips::default(),
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.aperture_stops.is_empty() {
            return Err(ConfigError::EmptyTable("aperture_stops"));
        }
        if self.shutter_speeds.is_empty() {
            return Err(ConfigError::EmptyTable("shutter_speeds"));
        }
        if self.focal_lengths.is_empty() {
            return Err(ConfigError::EmptyTable("focal_lengths"));
        }
        for &s in &self.shutter_speeds {
            positive("camera.shutter_speeds", s)?;
        }
        for &f in &self.focal_lengths {
            positive("camera.focal_lengths", f)?;
        }
        positive("camera.max_focus_distance", self.max_focus_distance)?;
        Ok(())
    }

    pub fn photo_aspect(&self) -> f32 {
        let (w, h) = self.photo_resolution;
        w.max(1) as f32 / h.max(1) as f32
    }
}
