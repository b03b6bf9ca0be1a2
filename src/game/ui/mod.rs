//! UI Module
//!
//! Screen-space widgets that are independent of the renderer.

pub mod scroll_text;

pub use scroll_text::ScrollableText;
