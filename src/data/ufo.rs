//! UFO glyph lookup
//!
//! The glyph view shows one glyph of a UFO source at a time. Overlays draw
//! that glyph's character, so the host needs to go from a typed character
//! to the glyph that encodes it.

use crate::error::{OverlayError, Result};
use crate::host::CurrentGlyph;
use norad::Font;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Encoded glyph names of a UFO's default layer
///
/// Only the character to glyph mapping is kept; `norad::Font` itself cannot
/// be shared between Bevy's system threads.
#[derive(Debug, Clone, Default)]
pub struct GlyphSource {
    glyphs: HashMap<char, String>,
}

impl GlyphSource {
    /// Load a UFO font file from disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let font = Font::load(path).map_err(|error| OverlayError::Ufo {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
        let source = Self::from_font(&font);
        info!(
            "Loaded UFO {:?} ({}) with {} encoded glyphs",
            path,
            font.font_info.family_name.as_deref().unwrap_or("unnamed"),
            source.len()
        );
        Ok(source)
    }

    /// Extract the codepoint mapping; the first glyph listing a codepoint wins
    pub fn from_font(font: &Font) -> Self {
        let mut glyphs = HashMap::new();
        for glyph in font.default_layer().iter() {
            for codepoint in glyph.codepoints.iter() {
                glyphs
                    .entry(codepoint)
                    .or_insert_with(|| glyph.name().to_string());
            }
        }
        Self { glyphs }
    }

    /// The default-layer glyph whose codepoints include `character`
    pub fn glyph_for_char(&self, character: char) -> Option<CurrentGlyph> {
        self.glyphs
            .get(&character)
            .map(|name| CurrentGlyph::new(name.clone(), Some(character)))
    }

    fn len(&self) -> usize {
        self.glyphs.len()
    }
}
