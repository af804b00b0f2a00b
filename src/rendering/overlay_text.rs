//! Overlay text entities
//!
//! When the controller invalidates the view, every overlay entity is
//! despawned and rebuilt from a fresh display list. Overlays are a handful
//! of text runs, so diffing them is not worth it.

use super::display_list::{DisplayList, TextRun};
use crate::core::config_file::PreferenceStore;
use crate::geometry::world_from_point;
use crate::host::{Channel, ViewerHost};
use crate::systems::ViewerRuntime;
use crate::viewer::Controller;
use bevy::prelude::*;
use bevy::sprite::Anchor;
use std::collections::HashMap;

/// Overlays sit above the glyph outline
const OVERLAY_Z: f32 = 20.0;

/// Marks text entities spawned for overlays
#[derive(Component)]
pub struct OverlayText;

/// Font handles already loaded for overlay labels
///
/// `None` records a label that could not be loaded so it is not retried
/// every redraw; the default font is used instead.
#[derive(Resource, Default)]
pub struct OverlayFonts {
    handles: HashMap<String, Option<Handle<Font>>>,
}

impl OverlayFonts {
    /// Handle for a `family` / `family-style` label
    pub fn handle_for<S: PreferenceStore>(
        &mut self,
        label: &str,
        controller: &mut Controller<S>,
        fonts: &mut Assets<Font>,
    ) -> Handle<Font> {
        if let Some(cached) = self.handles.get(label) {
            return cached.clone().unwrap_or_default();
        }

        let path = controller
            .catalog_mut()
            .resolve(label)
            .and_then(|face| face.path.clone());
        let handle = path.and_then(|path| match std::fs::read(&path) {
            Ok(bytes) => match Font::try_from_bytes(bytes) {
                Ok(font) => Some(fonts.add(font)),
                Err(error) => {
                    warn!("Could not parse font {:?}: {:?}", path, error);
                    None
                }
            },
            Err(error) => {
                warn!("Could not read font {:?}: {}", path, error);
                None
            }
        });
        if handle.is_none() {
            debug!("Using the default font for {}", label);
        }

        self.handles.insert(label.to_string(), handle.clone());
        handle.unwrap_or_default()
    }

    /// Drop every cached handle, e.g. after the font catalog was refreshed
    pub fn clear(&mut self) {
        self.handles.clear();
    }
}

fn text_color(run: &TextRun) -> Color {
    Color::srgba(
        run.color.red as f32,
        run.color.green as f32,
        run.color.blue as f32,
        run.color.alpha as f32,
    )
}

/// Rebuild overlay entities after the controller asked for a redraw
pub fn redraw_overlays(
    mut commands: Commands,
    mut runtime: ResMut<ViewerRuntime>,
    mut overlay_fonts: ResMut<OverlayFonts>,
    mut fonts: ResMut<Assets<Font>>,
    existing: Query<Entity, With<OverlayText>>,
) {
    // Clearing the redraw flag and filling the font cache are not changes
    // the settings pane has to react to.
    let runtime = runtime.bypass_change_detection();
    if !runtime.host.take_redraw() {
        return;
    }

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    let drawing = Channel::DRAWING
        .iter()
        .any(|&channel| runtime.host.is_subscribed(channel));
    if !drawing {
        return;
    }

    let mut list = DisplayList::new();
    runtime.controller.draw(&mut list);
    let runs = list.into_runs();
    debug!("Redrawing {} overlay text runs", runs.len());

    for run in runs {
        let font = overlay_fonts.handle_for(&run.font, &mut runtime.controller, &mut fonts);
        commands.spawn((
            Text2d::new(run.text.clone()),
            TextFont {
                font,
                font_size: run.size as f32,
                ..default()
            },
            TextColor(text_color(&run)),
            Anchor::BottomLeft,
            Transform::from_translation(world_from_point(run.position).extend(OVERLAY_Z)),
            OverlayText,
        ));
    }
}
