//! Overlay data model: records, the ordered registry, and hit testing

pub mod record;
pub mod registry;

pub use record::{OverlayRecord, Rgba, DEFAULT_SIZE, DEFAULT_X, DEFAULT_Y};
pub use registry::OverlayRegistry;
