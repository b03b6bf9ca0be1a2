//! Tutorial Module
//!
//! On-screen hints: a fading message queue and the triggers that fill it.

pub mod manager;
pub mod triggers;

pub use manager::TutorialManager;
pub use triggers::{CameraInstruction, CameraTutorial, PLAYER_TAG, TutorialTrigger, default_camera_instructions};
