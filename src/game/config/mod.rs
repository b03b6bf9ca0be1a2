//! Config Module
//!
//! Centralized tuning for every gameplay system. `Default` returns the values
//! the game ships with; JSON files may override any subset of fields and the
//! rest fall back to those defaults.

pub mod camera_config;
pub mod gameplay_config;
pub mod terminal_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use camera_config::{CameraClips, CameraConfig};
pub use gameplay_config::{
    BoardConfig, InteractionConfig, ObjectiveConfig, PlayerConfig, TutorialConfig,
};
pub use terminal_config::{
    LocationEntry, PhoneConfig, PhoneNumber, SelfDestructConfig, TerminalConfig,
    TerminalViewConfig, TypewriterConfig,
};

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} table must not be empty")]
    EmptyTable(&'static str),
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
}

/// Top-level game configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub camera: CameraConfig,
    pub objectives: ObjectiveConfig,
    pub terminal: TerminalConfig,
    pub player: PlayerConfig,
    pub interaction: InteractionConfig,
    pub board: BoardConfig,
    pub tutorial: TutorialConfig,
}

impl GameConfig {
    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        tracing::info!(path = %path.display(), "loaded game config");
        Ok(config)
    }

    /// Parse and validate config JSON. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would make gameplay code misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()?;
        positive("board.board_size.x", self.board.board_size.x)?;
        positive("board.board_size.y", self.board.board_size.y)?;
        positive("board.photo_scale", self.board.photo_scale)?;
        positive("terminal.cursor_blink_rate", self.terminal.cursor_blink_rate)?;
        positive("tutorial.fade_duration", self.tutorial.fade_duration)?;
        Ok(())
    }
}

pub(crate) fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
