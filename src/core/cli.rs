//! Command line interface for the reference viewer
//!
//! Handles parsing command line arguments and provides
//! validation for user inputs.

use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// Reference viewer CLI arguments
///
/// Examples:
///   reference-viewer                            # Empty glyph view, glyph "a"
///   reference-viewer --edit my-font.ufo         # Take glyphs from a UFO
///   reference-viewer --edit my-font.ufo -g あ   # Start on a specific glyph
///   reference-viewer --font-dir ~/Fonts         # Offer fonts from an extra directory
///   reference-viewer --list-fonts               # Print the fonts the viewer can use
#[derive(Parser, Debug, Resource, Clone)]
#[clap(
    name = "reference-viewer",
    version,
    about = "Reference glyph overlays for a Bevy glyph view",
    long_about = "Shows reference glyphs rendered in installed fonts on top of the glyph being edited. Overlays can be added, dragged, resized and recolored, and are saved between sessions."
)]
pub struct CliArgs {
    /// Path to a UFO source whose glyphs are shown
    #[clap(
        long = "edit",
        short = 'e',
        help = "UFO font source providing the glyphs",
        long_help = "Path to a UFO directory. Typed characters are resolved to glyphs of this font. Without a source, every typed character is shown as-is."
    )]
    pub font_source: Option<PathBuf>,

    /// Character of the glyph shown at startup
    #[clap(
        long = "glyph",
        short = 'g',
        default_value_t = 'a',
        help = "Character of the glyph shown at startup"
    )]
    pub glyph: char,

    /// Extra directories scanned for font files
    #[clap(
        long = "font-dir",
        help = "Additional font directory (repeatable)",
        long_help = "Directory scanned recursively for .ttf, .otf, .ttc and .otc files in addition to the platform font directories. Can be given several times."
    )]
    pub font_dirs: Vec<PathBuf>,

    /// Preference file to use instead of the default one
    #[clap(
        long = "defaults",
        help = "Preference file (defaults to ~/.config/reference-viewer/defaults.json)"
    )]
    pub defaults: Option<PathBuf>,

    /// Print the font catalog and exit
    #[clap(long = "list-fonts", help = "List the fonts overlays can use and exit")]
    pub list_fonts: bool,

    /// Initialize user configuration directory
    #[clap(
        long = "new-config",
        help = "Initialize the user config directory",
        long_help = "Create the ~/.config/reference-viewer directory with an empty defaults.json preference file."
    )]
    pub new_config: bool,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// This ensures that all paths exist and are valid before the application starts,
    /// providing clear error messages for common mistakes.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.font_source {
            if !path.exists() {
                return Err(format!(
                    "Font source does not exist: {}\nMake sure the path is correct and the file exists.",
                    path.display()
                ));
            }
            if !path.is_dir() || !path.join("metainfo.plist").exists() {
                return Err(format!(
                    "Not a valid UFO directory: missing metainfo.plist in {}\nMake sure this is a valid UFO directory.",
                    path.display()
                ));
            }
        }

        for dir in &self.font_dirs {
            if !dir.is_dir() {
                return Err(format!("Font directory does not exist: {}", dir.display()));
            }
        }

        if let Some(path) = &self.defaults {
            if path.is_dir() {
                return Err(format!(
                    "Preference path is a directory: {}\nExpected a JSON file.",
                    path.display()
                ));
            }
        }

        Ok(())
    }
}
