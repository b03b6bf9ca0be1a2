//! Camera Module
//!
//! Provides poses, first-person look, view transitions and raycasting.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod fps_controller;
pub mod pose;
pub mod raycast;
pub mod transition;

pub use fps_controller::FPSCameraController;
pub use pose::{Pose, look_rotation};
pub use raycast::{Ray, RayHit};
pub use transition::ViewTransition;
