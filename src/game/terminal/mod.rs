//! HyperTerminal
//!
//! An in-world retro computer with a typewriter command interpreter: boot
//! and shutdown, destinations for the travel system, a phone line, and a
//! self-destruct sequence that ends the game.

pub mod ascent;
pub mod commands;
pub mod display;
pub mod script;
pub mod session;

pub use ascent::RocketAscent;
pub use commands::{Command, DialError, LocationTable, SecretCommand};
pub use display::{CursorBlink, TEXT_COLOR};
pub use script::TerminalAction;
pub use session::{Terminal, TerminalContext, TerminalEvent, TerminalState};
