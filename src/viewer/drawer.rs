//! Draws every overlay over the glyph view

use crate::host::DrawContext;
use crate::overlay::OverlayRegistry;
use kurbo::Vec2;

/// Label size in glyph units, independent of the view zoom
pub const LABEL_SIZE: f64 = 20.0;

/// Distance between an overlay's origin and its label baseline
const LABEL_OFFSET: Vec2 = Vec2::new(0.0, -10.0);

/// Render each overlay's copy of `character` plus a label naming its font
pub fn draw_overlays(registry: &OverlayRegistry, character: &str, ctx: &mut dyn DrawContext) {
    ctx.save();
    for record in registry {
        let label = record.label();
        ctx.font(&label, record.size);
        ctx.fill(record.color);
        ctx.text(character, record.position());
        ctx.font(&label, LABEL_SIZE);
        ctx.text(&label, record.position() + LABEL_OFFSET);
    }
    ctx.restore();
}

/// The string drawn for a glyph: its character, or nothing
pub fn glyph_text(unicode: Option<char>) -> String {
    unicode.map(String::from).unwrap_or_default()
}
