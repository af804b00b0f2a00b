//! Input handling for the reference viewer
//!
//! Keyboard shortcuts stand in for the host's toolbar button and for the
//! settings window's controls:
//!
//! - Ctrl+R: toggle the viewer
//! - Right click: contextual menu (opens the settings panel)
//! - Typing a character while the panel is closed: switch glyph
//! - Panel open: Tab / Shift+Tab pick a font, Enter adds it, Up / Down move
//!   the selection, `=` / `-` resize, C cycles colors, Delete removes,
//!   F5 rescans installed fonts, Escape saves and closes

use super::ViewerRuntime;
use crate::geometry::point_from_world;
use crate::host::{CurrentGlyph, HostEvent};
use crate::overlay::Rgba;
use crate::rendering::overlay_text::OverlayFonts;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Size change per `=` / `-` press
const SIZE_STEP: f64 = 10.0;

/// Colors offered by the C key, in cycle order
pub const PALETTE: [Rgba; 5] = [
    Rgba::new(0.0, 0.0, 0.0, 1.0),
    Rgba::new(0.85, 0.2, 0.2, 0.6),
    Rgba::new(0.2, 0.45, 0.9, 0.6),
    Rgba::new(0.15, 0.65, 0.3, 0.6),
    Rgba::new(0.5, 0.5, 0.5, 0.35),
];

const PANEL_KEYS: [KeyCode; 9] = [
    KeyCode::Tab,
    KeyCode::Enter,
    KeyCode::ArrowUp,
    KeyCode::ArrowDown,
    KeyCode::Equal,
    KeyCode::Minus,
    KeyCode::KeyC,
    KeyCode::Delete,
    KeyCode::Backspace,
];

fn ctrl_held(keys: &ButtonInput<KeyCode>) -> bool {
    keys.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight])
}

/// The palette entry after `current`, starting over for unknown colors
pub fn next_palette_color(current: Rgba) -> Rgba {
    match PALETTE.iter().position(|&color| color == current) {
        Some(index) => PALETTE[(index + 1) % PALETTE.len()],
        None => PALETTE[0],
    }
}

/// Ctrl+R switches the viewer on and off
pub fn toggle_viewer(keys: Res<ButtonInput<KeyCode>>, mut runtime: ResMut<ViewerRuntime>) {
    if !(ctrl_held(&keys) && keys.just_pressed(KeyCode::KeyR)) {
        return;
    }

    let ViewerRuntime {
        controller, host, ..
    } = &mut *runtime;
    if let Err(error) = controller.toggle(host) {
        error!("Reference viewer could not be toggled: {}", error);
    }
}

/// Translate mouse buttons into viewer pointer events
pub fn handle_pointer(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    mut runtime: ResMut<ViewerRuntime>,
    mut last_position: Local<Option<Vec2>>,
) {
    let left_active = mouse.pressed(MouseButton::Left) || mouse.just_released(MouseButton::Left);
    if !left_active && !mouse.just_pressed(MouseButton::Right) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_position) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(world_position) = camera.viewport_to_world_2d(camera_transform, cursor_position) else {
        return;
    };
    let point = point_from_world(world_position);

    let ViewerRuntime {
        controller, host, ..
    } = &mut *runtime;

    if mouse.just_pressed(MouseButton::Left) {
        controller.handle(HostEvent::MouseDown { point }, host);
        *last_position = Some(world_position);
    } else if mouse.pressed(MouseButton::Left) && *last_position != Some(world_position) {
        controller.handle(HostEvent::MouseDragged { point }, host);
        *last_position = Some(world_position);
    }

    if mouse.just_released(MouseButton::Left) {
        controller.handle(HostEvent::MouseUp { point }, host);
        *last_position = None;
    }

    if mouse.just_pressed(MouseButton::Right) {
        let mut items = Vec::new();
        controller.handle(HostEvent::ContextualMenu { items: &mut items }, host);
        if let Some(&item) = items.first() {
            debug!("Contextual menu: {}", item.label());
            controller.activate_menu_item(item, host);
        }
    }
}

/// Typing a character switches the glyph shown under the overlays
pub fn switch_glyph(
    mut key_events: EventReader<KeyboardInput>,
    keys: Res<ButtonInput<KeyCode>>,
    mut runtime: ResMut<ViewerRuntime>,
) {
    for event in key_events.read() {
        if event.state != ButtonState::Pressed || ctrl_held(&keys) {
            continue;
        }
        if !runtime.controller.is_active() || runtime.controller.panel().is_open() {
            continue;
        }
        let Key::Character(text) = &event.logical_key else {
            continue;
        };
        let Some(character) = text.chars().next() else {
            continue;
        };

        let ViewerRuntime {
            controller,
            host,
            glyphs,
        } = &mut *runtime;
        let glyph = match glyphs {
            Some(source) => source.glyph_for_char(character),
            None => Some(CurrentGlyph::new(character.to_string(), Some(character))),
        };
        if glyph.is_none() {
            debug!("No glyph encodes {:?}", character);
        }
        controller.handle(HostEvent::GlyphChanged { glyph }, host);
    }
}

/// Keyboard controls of the open settings panel
pub fn handle_settings_keys(
    keys: Res<ButtonInput<KeyCode>>,
    mut runtime: ResMut<ViewerRuntime>,
    mut overlay_fonts: ResMut<OverlayFonts>,
) {
    if !runtime.controller.panel().is_open() {
        return;
    }
    if !keys.any_just_pressed([KeyCode::Escape, KeyCode::F5]) && !keys.any_just_pressed(PANEL_KEYS)
    {
        return;
    }

    let ViewerRuntime {
        controller, host, ..
    } = &mut *runtime;

    if keys.just_pressed(KeyCode::Escape) {
        if let Err(error) = controller.close_settings(host) {
            error!("Reference overlays were not saved: {}", error);
        }
        return;
    }

    if keys.just_pressed(KeyCode::F5) {
        controller.catalog_mut().refresh();
        overlay_fonts.clear();
        info!("Font list refreshed");
    }

    if !keys.any_just_pressed(PANEL_KEYS) {
        return;
    }

    let shift = keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    controller.edit_settings(host, |panel, ctx| {
        if keys.just_pressed(KeyCode::Tab) {
            panel.cycle_font(ctx.catalog, if shift { -1 } else { 1 });
        }
        if keys.just_pressed(KeyCode::Enter) {
            if let Err(error) = panel.add_font(ctx.registry, ctx.catalog, ctx.store) {
                warn!("Could not remember the chosen font: {}", error);
            }
        }

        let count = ctx.registry.len();
        if count > 0 {
            let selected = ctx.registry.selected_index();
            if keys.just_pressed(KeyCode::ArrowDown) {
                let next = selected.map_or(0, |index| (index + 1).min(count - 1));
                panel.select(ctx.registry, Some(next));
            }
            if keys.just_pressed(KeyCode::ArrowUp) {
                let next = selected.map_or(count - 1, |index| index.saturating_sub(1));
                panel.select(ctx.registry, Some(next));
            }
        }

        if keys.just_pressed(KeyCode::Equal) {
            panel.step_size(ctx.registry, SIZE_STEP);
        }
        if keys.just_pressed(KeyCode::Minus) {
            panel.step_size(ctx.registry, -SIZE_STEP);
        }
        if keys.just_pressed(KeyCode::KeyC) {
            if let Some(current) = ctx.registry.selected().map(|record| record.color) {
                panel.set_color(ctx.registry, next_palette_color(current));
            }
        }
        if keys.any_just_pressed([KeyCode::Delete, KeyCode::Backspace]) {
            if let Some(removed) = panel.delete_selected(ctx.registry) {
                info!("Removed overlay {}", removed);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles_and_wraps() {
        assert_eq!(next_palette_color(PALETTE[0]), PALETTE[1]);
        assert_eq!(next_palette_color(PALETTE[PALETTE.len() - 1]), PALETTE[0]);
        assert_eq!(next_palette_color(Rgba::new(0.1, 0.2, 0.3, 0.4)), PALETTE[0]);
    }
}
