//! Plugin wiring for the reference viewer
//!
//! Systems run in a fixed order each frame so that every event is handled
//! before the overlays are redrawn.

use super::input::{handle_pointer, handle_settings_keys, switch_glyph, toggle_viewer};
use super::ViewerRuntime;
use crate::rendering::overlay_text::{redraw_overlays, OverlayFonts};
use crate::ui::SettingsPanePlugin;
use bevy::prelude::*;

/// Adds the reference viewer to a glyph view app
///
/// The app must already hold a [`ViewerRuntime`] resource and a 2D camera.
pub struct ReferenceViewerPlugin;

impl Plugin for ReferenceViewerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OverlayFonts>()
            .add_plugins(SettingsPanePlugin)
            .add_systems(
                Update,
                (
                    toggle_viewer,
                    handle_settings_keys,
                    switch_glyph,
                    handle_pointer,
                    redraw_overlays,
                )
                    .chain()
                    .run_if(resource_exists::<ViewerRuntime>),
            );
        debug!("ReferenceViewerPlugin loaded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config_file::{JsonFileStore, PreferenceStore, SETTINGS_KEY};
    use crate::fonts::{FontCatalog, StaticFontSource};
    use crate::host::{Channel, ViewerHost};
    use crate::ui::settings_pane::{SettingsPane, SettingsPaneText};
    use crate::viewer::Controller;
    use bevy::input::keyboard::KeyboardInput;
    use serde_json::json;

    fn app_with_store(store: JsonFileStore) -> App {
        let controller = Controller::new(store, FontCatalog::new(StaticFontSource::default()));
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(ViewerRuntime::new(controller, None))
            .add_systems(Update, toggle_viewer);
        app
    }

    #[test]
    fn test_ctrl_r_toggles_viewer() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut store = JsonFileStore::open(dir.path().join("defaults.json")).expect("open");
        store
            .set(SETTINGS_KEY, json!([{"fontFamily": "Arial"}]))
            .expect("set");
        let mut app = app_with_store(store);

        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.press(KeyCode::ControlLeft);
            keys.press(KeyCode::KeyR);
        }
        app.update();

        let runtime = app.world().resource::<ViewerRuntime>();
        assert!(runtime.controller.is_active());
        assert_eq!(runtime.controller.registry().len(), 1);
        assert!(runtime.host.is_subscribed(Channel::Draw));
    }

    #[test]
    fn test_r_without_ctrl_does_nothing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::open(dir.path().join("defaults.json")).expect("open");
        let mut app = app_with_store(store);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyR);
        app.update();

        assert!(!app.world().resource::<ViewerRuntime>().controller.is_active());
    }

    #[test]
    fn test_settings_pane_follows_runtime_in_same_frame() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::open(dir.path().join("defaults.json")).expect("open");
        let controller = Controller::new(store, FontCatalog::new(StaticFontSource::default()));
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<Assets<Font>>()
            .add_event::<KeyboardInput>()
            .insert_resource(ViewerRuntime::new(controller, None))
            .add_plugins(ReferenceViewerPlugin);

        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.press(KeyCode::ControlLeft);
            keys.press(KeyCode::KeyR);
        }
        app.update();

        let world = app.world_mut();
        let visibility = *world
            .query_filtered::<&Visibility, With<SettingsPane>>()
            .single(world)
            .expect("pane");
        assert_eq!(visibility, Visibility::Visible);
        {
            let mut text = world
                .query_filtered::<&mut Text, With<SettingsPaneText>>()
                .single_mut(world)
                .expect("pane text");
            assert!(text.0.contains("(no overlays)"));

            // An idle frame leaves the pane alone.
            text.0 = "untouched".to_string();
        }
        {
            let mut keys = world.resource_mut::<ButtonInput<KeyCode>>();
            keys.release_all();
            keys.clear();
        }
        app.update();

        let world = app.world_mut();
        let text = world
            .query_filtered::<&Text, With<SettingsPaneText>>()
            .single(world)
            .expect("pane text");
        assert_eq!(text.0, "untouched");
    }
}
