//! Application runner logic
//!
//! Handles the different ways to run the reference viewer

use crate::core::app::{create_app, font_source};
use crate::core::cli::CliArgs;
use crate::core::config_file::initialize_config_directory;
use crate::fonts::FontCatalog;
use crate::logging;
use anyhow::Result;

/// Create and run the application with the given CLI arguments.
/// Handles special CLI flags before opening a window.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    if cli_args.new_config {
        return initialize_config_directory();
    }

    if cli_args.list_fonts {
        logging::init_cli_logging();
        cli_args
            .validate()
            .map_err(|e| anyhow::anyhow!("CLI validation failed: {}", e))?;
        for label in list_fonts(&cli_args) {
            println!("{label}");
        }
        return Ok(());
    }

    let mut app = create_app(cli_args)?;
    app.run();
    Ok(())
}

/// Labels of every font the settings panel would offer
fn list_fonts(cli_args: &CliArgs) -> Vec<String> {
    let source = font_source(cli_args);
    tracing::debug!("Scanning font directories {:?}", source.directories());
    let mut catalog = FontCatalog::new(source);
    let labels = catalog.labels();
    tracing::info!("{} fonts available", labels.len());
    labels
}
