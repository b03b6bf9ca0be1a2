//! Player Module
//!
//! The first-person controller: movement, look, head bob and footsteps.

pub mod controller;

pub use controller::PlayerController;
