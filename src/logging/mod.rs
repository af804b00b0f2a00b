//! Application logging functionality
//!
//! The windowed app logs through Bevy's `LogPlugin`; the command line paths
//! that never open a window install a plain `tracing-subscriber` instead.

use bevy::log::{Level, LogPlugin};
use bevy::prelude::default;
use tracing_subscriber::EnvFilter;

/// Configure logging with performance optimization for release builds
pub fn configure_logging() -> LogPlugin {
    #[cfg(debug_assertions)]
    {
        // Debug builds: Show more detailed logging for development
        LogPlugin {
            level: Level::INFO,
            filter: "reference_viewer=debug,bevy_render=warn,bevy_winit=warn,wgpu=warn,winit=warn,bevy_ecs::error::handler=error".to_string(),
            ..default()
        }
    }

    #[cfg(not(debug_assertions))]
    {
        // Release builds: Quieter logging, focus on warnings and errors
        LogPlugin {
            level: Level::WARN,
            filter: "reference_viewer=info,bevy=warn,wgpu=error,winit=error,bevy_ecs::error::handler=error".to_string(),
            ..default()
        }
    }
}

/// Install a stderr subscriber for command line runs
///
/// `RUST_LOG` overrides the default filter.
pub fn init_cli_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("reference_viewer=info"));
    // A subscriber may already be installed, e.g. by a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
