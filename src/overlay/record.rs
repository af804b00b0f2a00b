//! A single reference overlay
//!
//! Records are stored in preferences as camelCase JSON objects:
//! `{"fontFamily": "Arial", "fontStyle": "Bold", "size": 300.0,
//! "color": [0.0, 0.0, 0.0, 1.0], "x": -300.0, "y": 0.0}`.
//! `fontStyle` is omitted when empty; every field except `fontFamily`
//! falls back to its default when missing, and unknown keys are rejected.

use crate::geometry::{closed_contains, overlay_box};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_SIZE: f64 = 300.0;
pub const DEFAULT_X: f64 = -300.0;
pub const DEFAULT_Y: f64 = 0.0;

/// RGBA color with components in `[0, 1]`, serialized as a 4-element array
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Rgba {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[f64; 4]> for Rgba {
    fn from([red, green, blue, alpha]: [f64; 4]) -> Self {
        Self::new(red, green, blue, alpha)
    }
}

impl From<Rgba> for [f64; 4] {
    fn from(color: Rgba) -> Self {
        [color.red, color.green, color.blue, color.alpha]
    }
}

/// One configured reference-font rendering shown atop the active glyph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OverlayRecord {
    pub font_family: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub font_style: String,
    #[serde(default = "default_size")]
    pub size: f64,
    #[serde(default)]
    pub color: Rgba,
    #[serde(default = "default_x")]
    pub x: f64,
    #[serde(default = "default_y")]
    pub y: f64,
}

fn default_size() -> f64 {
    DEFAULT_SIZE
}

fn default_x() -> f64 {
    DEFAULT_X
}

fn default_y() -> f64 {
    DEFAULT_Y
}

impl OverlayRecord {
    /// Create a record for a font family with every other field defaulted
    pub fn new(font_family: impl Into<String>) -> Self {
        Self {
            font_family: font_family.into(),
            font_style: String::new(),
            size: DEFAULT_SIZE,
            color: Rgba::BLACK,
            x: DEFAULT_X,
            y: DEFAULT_Y,
        }
    }

    pub fn with_style(mut self, font_style: impl Into<String>) -> Self {
        self.font_style = font_style.into();
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Top-left corner of the overlay in glyph view coordinates
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    /// Square footprint of side `size`, independent of the rendered glyph
    pub fn bounds(&self) -> Rect {
        overlay_box(self.position(), self.size)
    }

    /// Whether `point` lies inside the closed footprint
    pub fn point_inside(&self, point: Point) -> bool {
        closed_contains(self.bounds(), point)
    }

    /// Font name used for drawing and listing: `family` or `family-style`
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// The persisted mapping for this record
    pub fn to_value(&self) -> serde_json::Value {
        // Plain data with string keys always serializes.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for OverlayRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.font_style.is_empty() {
            write!(f, "{}", self.font_family)
        } else {
            write!(f, "{}-{}", self.font_family, self.font_style)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_construction() {
        let record = OverlayRecord::new("Arial");
        assert_eq!(record.font_family, "Arial");
        assert_eq!(record.font_style, "");
        assert_eq!(record.size, 300.0);
        assert_eq!(record.color, Rgba::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(record.x, -300.0);
        assert_eq!(record.y, 0.0);
        assert_eq!(record.position(), Point::new(-300.0, 0.0));
    }

    #[test]
    fn test_display_label() {
        assert_eq!(OverlayRecord::new("Arial").with_style("Bold").to_string(), "Arial-Bold");
        assert_eq!(OverlayRecord::new("Arial").with_style("").to_string(), "Arial");
        assert_eq!(OverlayRecord::new("Arial").label(), "Arial");
    }

    #[test]
    fn test_point_inside_matches_closed_box() {
        let record = OverlayRecord::new("Arial")
            .with_size(100.0)
            .with_position(10.0, 20.0);
        let samples = [
            (10.0, 20.0, true),
            (110.0, 120.0, true),
            (60.0, 70.0, true),
            (9.99, 50.0, false),
            (50.0, 120.01, false),
            (110.01, 20.0, false),
        ];
        for (x, y, expected) in samples {
            assert_eq!(
                record.point_inside(Point::new(x, y)),
                expected,
                "point ({x}, {y})"
            );
        }
    }

    #[test]
    fn test_to_value_field_set() {
        let plain = OverlayRecord::new("Arial").to_value();
        assert_eq!(
            plain,
            json!({"fontFamily": "Arial", "size": 300.0, "color": [0.0, 0.0, 0.0, 1.0], "x": -300.0, "y": 0.0})
        );

        let styled = OverlayRecord::new("Arial").with_style("Bold").to_value();
        assert_eq!(styled["fontStyle"], json!("Bold"));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let record: OverlayRecord =
            serde_json::from_value(json!({"fontFamily": "Menlo", "x": 12})).expect("record");
        assert_eq!(record, OverlayRecord::new("Menlo").with_position(12.0, 0.0));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result: Result<OverlayRecord, _> =
            serde_json::from_value(json!({"fontFamily": "Menlo", "weight": 700}));
        assert!(result.is_err());
    }

    #[test]
    fn test_out_of_range_size_is_kept() {
        let record: OverlayRecord =
            serde_json::from_value(json!({"fontFamily": "Menlo", "size": 5000})).expect("record");
        assert_eq!(record.size, 5000.0);
    }
}
