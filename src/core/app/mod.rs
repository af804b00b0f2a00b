//! Application initialization
//!
//! This module contains the app builder: window, logging, the viewer
//! runtime and its plugin.

pub mod builder;

// Re-export the main app creation function for convenience
pub use builder::{build_runtime, create_app, font_source};
