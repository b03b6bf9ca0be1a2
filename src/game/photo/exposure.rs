//! Exposure Settings
//!
//! Discrete aperture / shutter / focal-length stops plus a continuous focus
//! distance. Stops only change through the cycle operations, which wrap
//! around their tables, and focus only through [`ExposureSettings::adjust_focus`].

use crate::game::config::{CameraConfig, ConfigError};

/// Reference field of view at a 50mm focal length.
const BASE_FOV: f32 = 70.0;
const REFERENCE_FOCAL_LENGTH: f32 = 50.0;
const MIN_ZOOM_FOV: f32 = 15.0;
pub const MIN_FOCUS_DISTANCE: f32 = 0.5;
/// Scroll input at or below this magnitude is ignored.
const SCROLL_DEADZONE: f32 = 0.01;

/// `log2(aperture² / shutter_speed)`
pub fn exposure_value(aperture: f32, shutter_speed: f32) -> f32 {
    (aperture * aperture / shutter_speed).log2()
}

#[derive(Clone, Debug)]
pub struct ExposureSettings {
    aperture_stops: Vec<f32>,
    shutter_speeds: Vec<f32>,
    focal_lengths: Vec<f32>,
    aperture_index: usize,
    shutter_index: usize,
    focal_index: usize,
    focus_distance: f32,
    max_focus_distance: f32,
    focus_speed: f32,
    max_zoom_fov: f32,
}

impl ExposureSettings {
    pub fn from_config(config: &CameraConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let max_focus_distance = config.max_focus_distance.max(MIN_FOCUS_DISTANCE);
        Ok(Self {
            aperture_stops: config.aperture_stops.clone(),
            shutter_speeds: config.shutter_speeds.clone(),
            focal_lengths: config.focal_lengths.clone(),
            aperture_index: 0,
            shutter_index: 0,
            focal_index: 0,
            focus_distance: config
                .initial_focus_distance
                .clamp(MIN_FOCUS_DISTANCE, max_focus_distance),
            max_focus_distance,
            focus_speed: config.focus_speed,
            max_zoom_fov: config.max_zoom_fov,
        })
    }

    pub fn aperture(&self) -> f32 {
        self.aperture_stops[self.aperture_index]
    }

    pub fn shutter_speed(&self) -> f32 {
        self.shutter_speeds[self.shutter_index]
    }

    pub fn focal_length(&self) -> f32 {
        self.focal_lengths[self.focal_index]
    }

    pub fn focus_distance(&self) -> f32 {
        self.focus_distance
    }

    pub fn aperture_index(&self) -> usize {
        self.aperture_index
    }

    pub fn shutter_index(&self) -> usize {
        self.shutter_index
    }

    pub fn focal_index(&self) -> usize {
        self.focal_index
    }

    pub fn cycle_aperture(&mut self) -> f32 {
        self.aperture_index = (self.aperture_index + 1) % self.aperture_stops.len();
        tracing::debug!(aperture = self.aperture(), "aperture changed");
        self.aperture()
    }

    pub fn cycle_shutter(&mut self) -> f32 {
        self.shutter_index = (self.shutter_index + 1) % self.shutter_speeds.len();
        tracing::debug!(shutter = self.shutter_speed(), "shutter speed changed");
        self.shutter_speed()
    }

    pub fn cycle_focal_length(&mut self) -> f32 {
        self.focal_index = (self.focal_index + 1) % self.focal_lengths.len();
        tracing::debug!(focal_length = self.focal_length(), "focal length changed");
        self.focal_length()
    }

    /// Move focus by `delta` meters, clamped to `[0.5, max_focus_distance]`.
    pub fn adjust_focus(&mut self, delta: f32) -> f32 {
        self.focus_distance =
            (self.focus_distance + delta).clamp(MIN_FOCUS_DISTANCE, self.max_focus_distance);
        self.focus_distance
    }

    /// Apply a scroll-wheel reading. Returns whether focus was adjusted.
    pub fn apply_scroll(&mut self, scroll: f32) -> bool {
        if scroll.abs() <= SCROLL_DEADZONE {
            return false;
        }
        let focus = self.adjust_focus(scroll * self.focus_speed);
        tracing::debug!(focus = format!("{focus:.2}m"), "focus distance");
        true
    }

    pub fn exposure_value(&self) -> f32 {
        exposure_value(self.aperture(), self.shutter_speed())
    }

    /// Lens field of view for the current focal length (degrees).
    pub fn field_of_view(&self) -> f32 {
        (BASE_FOV * (REFERENCE_FOCAL_LENGTH / self.focal_length())).clamp(MIN_ZOOM_FOV, self.max_zoom_fov)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ExposureSettings {
        ExposureSettings::from_config(&CameraConfig::default()).unwrap()
    }

    #[test]
    fn test_cycles_stay_in_range() {
        let mut s = settings();
        for n in 0..50 {
            s.cycle_aperture();
            s.cycle_shutter();
            s.cycle_focal_length();
            assert!(s.aperture_index() < 8);
            assert!(s.shutter_index() < 7);
            assert!(s.focal_index() < 3);
            assert_eq!(s.aperture_index(), (n + 1) % 8);
        }
    }

    #[test]
    fn test_cycle_wraps_to_first_stop() {
        let mut s = settings();
        for _ in 0..7 {
            s.cycle_shutter();
        }
        assert_eq!(s.shutter_speed(), 1000.0);
    }

    #[test]
    fn test_exposure_value_spot_check() {
        assert!((exposure_value(2.8, 125.0) - (-3.993)).abs() < 1e-3);

        let mut s = settings();
        s.cycle_aperture();
        s.cycle_aperture();
        for _ in 0..3 {
            s.cycle_shutter();
        }
        assert_eq!((s.aperture(), s.shutter_speed()), (2.8, 125.0));
        assert!((s.exposure_value() + 3.993).abs() < 1e-3);
    }

    #[test]
    fn test_exposure_value_over_all_stops() {
        let config = CameraConfig::default();
        for &a in &config.aperture_stops {
            for &t in &config.shutter_speeds {
                let expected = (a * a / t).ln() / 2f32.ln();
                assert!((exposure_value(a, t) - expected).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_focus_clamps() {
        let mut s = settings();
        assert_eq!(s.focus_distance(), 2.0);
        assert_eq!(s.adjust_focus(-10.0), 0.5);
        assert_eq!(s.adjust_focus(100.0), 10.0);
    }

    #[test]
    fn test_scroll_deadzone_and_speed() {
        let mut s = settings();
        assert!(!s.apply_scroll(0.01));
        assert_eq!(s.focus_distance(), 2.0);
        assert!(s.apply_scroll(0.1));
        assert!((s.focus_distance() - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_field_of_view_follows_focal_length() {
        let mut s = settings();
        assert!((s.field_of_view() - 100.0f32.min(85.0)).abs() < 1e-4);
        s.cycle_focal_length();
        assert!((s.field_of_view() - 70.0).abs() < 1e-4);
        s.cycle_focal_length();
        assert!((s.field_of_view() - 70.0 * 50.0 / 85.0).abs() < 1e-4);
    }
}
