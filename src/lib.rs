//! Reference Viewer
//!
//! Overlays reference glyphs, rendered in installed fonts, on the glyph
//! being edited. The overlay model, persistence and event handling live in
//! [`overlay`], [`viewer`] and [`host`]; the Bevy glyph view that hosts them
//! lives in [`core`], [`systems`], [`rendering`] and [`ui`].
pub mod core;
pub mod data;
pub mod error;
pub mod fonts;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod overlay;
pub mod rendering;
pub mod systems;
pub mod ui;
pub mod viewer;

pub use error::{OverlayError, Result};
