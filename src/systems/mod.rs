//! Bevy integration
//!
//! The glyph view is a Bevy 2D scene. These systems play the host's part:
//! they turn keyboard and pointer input into viewer events and keep the
//! overlay entities in sync with the controller.

pub mod input;
pub mod plugins;

pub use plugins::ReferenceViewerPlugin;

use crate::core::config_file::JsonFileStore;
use crate::data::GlyphSource;
use crate::host::Subscriptions;
use crate::viewer::Controller;
use bevy::prelude::*;

/// Everything the viewer owns while the app runs
#[derive(Resource)]
pub struct ViewerRuntime {
    pub controller: Controller<JsonFileStore>,
    pub host: Subscriptions,
    /// UFO the glyph view is editing, if any
    pub glyphs: Option<GlyphSource>,
}

impl ViewerRuntime {
    pub fn new(controller: Controller<JsonFileStore>, glyphs: Option<GlyphSource>) -> Self {
        Self {
            controller,
            host: Subscriptions::default(),
            glyphs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_can_be_a_resource() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<ViewerRuntime>();
    }
}
