//! Shutterbug Engine Library
//!
//! Gameplay logic for a first-person photography exploration game. The host
//! engine (rendering, physics, audio mixing, scene graph) is reached through
//! the narrow traits in [`services`] and [`world`]; everything here runs on a
//! single frame tick.
//!
//! # Modules
//!
//! - [`input`] - Platform-agnostic per-frame keyboard and mouse snapshots
//! - [`camera`] - Poses, first-person look, view transitions and raycasting
//! - [`world`] - Entity ids and the scene query collaborator
//! - [`sequence`] - Timed step sequences driven by the frame tick
//! - [`services`] - Audio, offscreen render, clock and process collaborators
//! - [`game`] - Player, interactables, photo pipeline, terminal and tutorial
//!
//! # Example
//!
//! ```ignore
//! use shutterbug_engine::game::terminal::{Terminal, TerminalContext};
//! use shutterbug_engine::game::config::GameConfig;
//!
//! let config = GameConfig::default();
//! let mut terminal = Terminal::new(config.terminal.clone(), screen_pose);
//! terminal.open_session(&player_eye);
//!
//! // every frame
//! let events = terminal.update(dt, &input, &mut ctx);
//! ```

pub mod camera;
pub mod input;
pub mod sequence;
pub mod services;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used types
pub use camera::{Pose, Ray, RayHit};
pub use input::{InputAction, InputState, KeyCode, KeyboardState, MouseButton, MouseState};
pub use sequence::{Sequence, Step};
pub use services::{AudioSink, Clock, LoopSource, ProcessControl, ViewRenderer};
pub use world::{EntityId, Scene};
