//! A `DrawContext` that records text runs instead of painting
//!
//! The Bevy adapter turns the recorded runs into `Text2d` entities; tests
//! inspect them directly.

use crate::host::DrawContext;
use crate::overlay::Rgba;
use kurbo::Point;

/// One piece of text as it should appear in the glyph view
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font: String,
    pub size: f64,
    pub color: Rgba,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq)]
struct GraphicsState {
    font: String,
    size: f64,
    color: Rgba,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            font: String::new(),
            size: 10.0,
            color: Rgba::BLACK,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    runs: Vec<TextRun>,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    pub fn into_runs(self) -> Vec<TextRun> {
        self.runs
    }
}

impl DrawContext for DisplayList {
    fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn font(&mut self, name: &str, size: f64) {
        self.state.font = name.to_string();
        self.state.size = size;
    }

    fn fill(&mut self, color: Rgba) {
        self.state.color = color;
    }

    fn text(&mut self, text: &str, position: Point) {
        if text.is_empty() {
            return;
        }
        self.runs.push(TextRun {
            text: text.to_string(),
            font: self.state.font.clone(),
            size: self.state.size,
            color: self.state.color,
            position,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_returns_to_saved_state() {
        let mut list = DisplayList::new();
        list.font("Menlo", 12.0);
        list.save();
        list.font("Arial", 40.0);
        list.fill(Rgba::new(1.0, 0.0, 0.0, 1.0));
        list.text("A", Point::new(1.0, 2.0));
        list.restore();
        list.text("B", Point::ORIGIN);

        let runs = list.runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].font, "Arial");
        assert_eq!(runs[0].color, Rgba::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(runs[1].font, "Menlo");
        assert_eq!(runs[1].size, 12.0);
        assert_eq!(runs[1].color, Rgba::BLACK);
    }

    #[test]
    fn test_empty_text_is_skipped() {
        let mut list = DisplayList::new();
        list.text("", Point::ORIGIN);
        assert!(list.runs().is_empty());
    }

    #[test]
    fn test_unbalanced_restore_is_ignored() {
        let mut list = DisplayList::new();
        list.font("Menlo", 30.0);
        list.restore();
        list.text("x", Point::ORIGIN);
        assert_eq!(list.runs()[0].font, "Menlo");
    }
}
