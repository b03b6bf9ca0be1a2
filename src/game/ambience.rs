//! Ambience
//!
//! Keeps the background loop running and fades it in whenever it is
//! enabled.

use crate::game::config::TutorialConfig;
use crate::services::LoopSource;

#[derive(Clone, Debug)]
pub struct Ambience {
    target_volume: f32,
    fade_in: f32,
    /// Seconds into the current fade, `None` once settled
    fading: Option<f32>,
}

impl Ambience {
    pub fn new(target_volume: f32, fade_in: f32) -> Self {
        Self {
            target_volume,
            fade_in,
            fading: None,
        }
    }

    pub fn from_config(config: &TutorialConfig) -> Self {
        Self::new(config.ambience_volume, config.ambience_fade_in)
    }

    /// Start the loop from silence and begin the fade in.
    pub fn enable(&mut self, source: &mut dyn LoopSource) {
        source.set_volume(0.0);
        source.play();
        self.fading = Some(0.0);
        tracing::debug!(volume = self.target_volume, "ambience fading in");
    }

    pub fn is_fading(&self) -> bool {
        self.fading.is_some()
    }

    pub fn update(&mut self, dt: f32, source: &mut dyn LoopSource) {
        if let Some(elapsed) = self.fading.as_mut() {
            *elapsed += dt;
            let t = if self.fade_in > 0.0 {
                (*elapsed / self.fade_in).min(1.0)
            } else {
                1.0
            };
            source.set_volume(self.target_volume * t);
            if t >= 1.0 {
                self.fading = None;
            }
        }
        if !source.is_playing() {
            tracing::debug!("ambience loop restarted");
            source.play();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::LoopLog;

    #[test]
    fn test_fade_in_reaches_target() {
        let mut source = LoopLog::default();
        let mut ambience = Ambience::new(0.15, 2.0);
        ambience.enable(&mut source);
        assert!(source.playing);
        assert_eq!(source.volume, 0.0);

        ambience.update(1.0, &mut source);
        assert!((source.volume - 0.075).abs() < 1e-6);
        ambience.update(1.5, &mut source);
        assert!((source.volume - 0.15).abs() < 1e-6);
        assert!(!ambience.is_fading());
    }

    #[test]
    fn test_stopped_loop_is_restarted() {
        let mut source = LoopLog::default();
        let mut ambience = Ambience::new(0.15, 2.0);
        ambience.update(0.1, &mut source);
        assert!(source.playing);
        assert_eq!(source.starts, 1);
        ambience.update(0.1, &mut source);
        assert_eq!(source.starts, 1);
    }
}
