//! Core application functionality
//!
//! This module contains the core application logic, including:
//! - Application initialization and configuration
//! - Preference storage
//! - CLI handling and error reporting

pub mod app;
pub mod cli;
pub mod config_file;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use app::create_app;
pub use cli::CliArgs;
pub use config_file::{JsonFileStore, MemoryStore, PreferenceStore};
pub use runner::run_app;
