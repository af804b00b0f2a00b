//! Font source data

pub mod ufo;

pub use ufo::GlyphSource;
