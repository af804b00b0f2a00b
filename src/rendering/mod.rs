//! Rendering
//!
//! This module contains the drawing side of the viewer:
//! - A display list that records what the viewer draws
//! - Bevy systems that turn display lists into text entities

pub mod display_list;
pub mod overlay_text;

// Re-export commonly used items
pub use display_list::{DisplayList, TextRun};
pub use overlay_text::{OverlayFonts, OverlayText};
