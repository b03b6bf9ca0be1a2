//! Game Module
//!
//! Gameplay systems built on the engine: configuration, the photo pipeline,
//! the HyperTerminal, interactables, the player controller, tutorial hints,
//! ambience and UI widgets.

pub mod ambience;
pub mod config;
pub mod interact;
pub mod photo;
pub mod player;
pub mod terminal;
pub mod tutorial;
pub mod ui;

pub use ambience::Ambience;
pub use config::{ConfigError, GameConfig};
pub use interact::{Interactable, InteractionController, InteractionEvent, Interactor, Inventory};
pub use photo::{CapturedPhoto, ObjectiveValidator, PhotoAlbum, PhotoBoard, PhotoCamera};
pub use player::PlayerController;
pub use terminal::{Terminal, TerminalContext, TerminalEvent, TerminalState};
pub use tutorial::{CameraTutorial, TutorialManager, TutorialTrigger};
pub use ui::ScrollableText;
