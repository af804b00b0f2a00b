//! Settings Pane Module
//!
//! A floating panel in the top-right corner that shows the settings panel
//! state: the font chooser, the overlay list with its selection, and the
//! selected overlay's size and color. Editing happens through the keyboard
//! shortcuts in `systems::input`.

use crate::core::config_file::PreferenceStore;
use crate::rendering::overlay_text::redraw_overlays;
use crate::systems::ViewerRuntime;
use crate::viewer::Controller;
use bevy::prelude::*;
use std::fmt::Write;

// ============================================================================
// DESIGN CONSTANTS
// ============================================================================

const PANE_MARGIN: f32 = 16.0;
const PANE_PADDING: f32 = 12.0;
const PANE_TEXT_SIZE: f32 = 14.0;
const PANE_BACKGROUND: Color = Color::srgba(0.08, 0.08, 0.08, 0.85);
const PANE_TEXT_COLOR: Color = Color::srgb(0.9, 0.9, 0.9);

pub const PANE_TITLE: &str = "Reference Viewer Settings";

// ============================================================================
// COMPONENTS
// ============================================================================

#[derive(Component)]
pub struct SettingsPane;

#[derive(Component)]
pub struct SettingsPaneText;

pub struct SettingsPanePlugin;

impl Plugin for SettingsPanePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_settings_pane)
            .add_systems(
                Update,
                update_settings_pane
                    .after(redraw_overlays)
                    .run_if(resource_exists::<ViewerRuntime>),
            );
    }
}

/// Spawns the hidden settings pane
pub fn spawn_settings_pane(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(PANE_MARGIN),
                right: Val::Px(PANE_MARGIN),
                padding: UiRect::all(Val::Px(PANE_PADDING)),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(PANE_BACKGROUND),
            Visibility::Hidden,
            SettingsPane,
            Name::new("SettingsPane"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(PANE_TITLE),
                TextFont {
                    font_size: PANE_TEXT_SIZE,
                    ..default()
                },
                TextColor(PANE_TEXT_COLOR),
                SettingsPaneText,
            ));
        });
}

/// Text describing the panel: chooser, overlay rows, selected controls
pub fn settings_listing<S: PreferenceStore>(controller: &Controller<S>) -> String {
    let panel = controller.panel();
    let registry = controller.registry();
    let mut listing = String::new();

    let _ = writeln!(listing, "{PANE_TITLE}");
    let _ = writeln!(listing, "Font: {}  [Tab] change  [Enter] add", panel.font_choice());
    if registry.is_empty() {
        let _ = writeln!(listing, "  (no overlays)");
    }
    for (index, record) in registry.iter().enumerate() {
        let marker = if registry.selected_index() == Some(index) {
            '>'
        } else {
            ' '
        };
        let _ = writeln!(listing, "{marker} {record}");
    }

    if panel.controls_visible() {
        if let Some(record) = registry.selected() {
            let color = record.color;
            let _ = writeln!(
                listing,
                "Size: {}  [=/-]   Color: {:.2} {:.2} {:.2} {:.2}  [C]",
                panel.size_text(),
                color.red,
                color.green,
                color.blue,
                color.alpha
            );
        }
    }
    let _ = write!(listing, "[Del] remove  [F5] rescan fonts  [Esc] save and close");
    listing
}

/// Keeps the pane text and visibility in sync with the controller
fn update_settings_pane(
    runtime: Res<ViewerRuntime>,
    mut panes: Query<&mut Visibility, With<SettingsPane>>,
    mut texts: Query<&mut Text, With<SettingsPaneText>>,
) {
    if !runtime.is_changed() {
        return;
    }

    let open = runtime.controller.panel().is_open();
    for mut visibility in panes.iter_mut() {
        *visibility = if open {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }

    if open {
        if let Ok(mut text) = texts.single_mut() {
            *text = Text::new(settings_listing(&runtime.controller));
        }
    }
}
