//! Application builder and initialization
//!
//! This module provides the main app creation function

use crate::core::cli::CliArgs;
use crate::core::config_file::JsonFileStore;
use crate::data::GlyphSource;
use crate::fonts::{DirectoryFontSource, FontCatalog};
use crate::host::CurrentGlyph;
use crate::logging::configure_logging;
use crate::systems::{ReferenceViewerPlugin, ViewerRuntime};
use crate::viewer::Controller;
use anyhow::{Context, Result};
use bevy::prelude::*;
use bevy::winit::WinitSettings;

pub const WINDOW_TITLE: &str = "Reference Viewer";
pub const DEFAULT_WINDOW_SIZE: (f32, f32) = (1280.0, 800.0);

/// Background of the glyph view
const BACKGROUND_COLOR: Color = Color::srgb(0.96, 0.96, 0.94);

/// Creates a Bevy glyph view application hosting the reference viewer.
pub fn create_app(cli_args: CliArgs) -> Result<App> {
    cli_args
        .validate()
        .map_err(|e| anyhow::anyhow!("CLI validation failed: {}", e))?;

    let runtime = build_runtime(&cli_args)?;

    let mut app = App::new();
    app.insert_resource(cli_args)
        .insert_resource(runtime)
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(WinitSettings::desktop_app());
    configure_window_plugins(&mut app);
    app.add_plugins(ReferenceViewerPlugin)
        .add_systems(Startup, spawn_glyph_view);
    Ok(app)
}

/// Build the viewer's controller, preference store and glyph source
pub fn build_runtime(cli_args: &CliArgs) -> Result<ViewerRuntime> {
    let store = match &cli_args.defaults {
        Some(path) => JsonFileStore::open(path),
        None => JsonFileStore::open_default(),
    }
    .context("open reference viewer preferences")?;
    info!("Using preferences from {:?}", store.path());

    let catalog = FontCatalog::new(font_source(cli_args));

    let glyphs = cli_args
        .font_source
        .as_ref()
        .map(GlyphSource::open)
        .transpose()
        .context("open font source")?;

    let mut runtime = ViewerRuntime::new(Controller::new(store, catalog), glyphs);
    let glyph = initial_glyph(&runtime, cli_args.glyph);
    runtime.controller.set_current_glyph(glyph);
    Ok(runtime)
}

/// Platform font directories plus any given on the command line
pub fn font_source(cli_args: &CliArgs) -> DirectoryFontSource {
    DirectoryFontSource::platform().with_directories(cli_args.font_dirs.iter().cloned())
}

fn initial_glyph(runtime: &ViewerRuntime, character: char) -> Option<CurrentGlyph> {
    match &runtime.glyphs {
        Some(source) => source.glyph_for_char(character),
        None => Some(CurrentGlyph::new(character.to_string(), Some(character))),
    }
}

/// Configure window and default plugins
fn configure_window_plugins(app: &mut App) {
    let window_config = Window {
        title: WINDOW_TITLE.to_string(),
        resolution: DEFAULT_WINDOW_SIZE.into(),
        ..default()
    };

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(window_config),
                ..default()
            })
            .set(configure_logging()),
    );
}

/// Spawn the glyph view camera
fn spawn_glyph_view(mut commands: Commands, runtime: Res<ViewerRuntime>) {
    commands.spawn((Camera2d, Name::new("GlyphViewCamera")));

    let glyph = runtime
        .controller
        .current_glyph()
        .map_or("no glyph", |glyph| glyph.name.as_str());
    info!("Glyph view ready on {}, press Ctrl+R to show reference glyphs", glyph);
}
