//! The reference viewer itself: session controller, settings panel, drawing

pub mod controller;
pub mod drawer;
pub mod settings_panel;

pub use controller::{Controller, PanelContext};
pub use drawer::{draw_overlays, glyph_text, LABEL_SIZE};
pub use settings_panel::{SettingsPanel, MAX_SIZE, MIN_SIZE};
