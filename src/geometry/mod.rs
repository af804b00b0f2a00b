//! Geometric helpers for overlay hit testing
//!
//! Overlays live in glyph view coordinates (y up, font units). Hit testing
//! uses kurbo types; the Bevy adapter converts from `Vec2` at the boundary.

use bevy::math::Vec2 as BevyVec2;
use kurbo::{Point, Rect};

/// The square footprint of an overlay anchored at its top-left corner.
///
/// The rect is not normalised: a negative `side` yields an inverted rect
/// that [`closed_contains`] never matches.
pub fn overlay_box(origin: Point, side: f64) -> Rect {
    Rect::new(origin.x, origin.y, origin.x + side, origin.y + side)
}

/// Containment with inclusive edges on both axes.
///
/// `kurbo::Rect::contains` treats the far edges as open, which would make
/// the right and top borders of an overlay unclickable.
pub fn closed_contains(rect: Rect, point: Point) -> bool {
    rect.x0 <= point.x && point.x <= rect.x1 && rect.y0 <= point.y && point.y <= rect.y1
}

/// Convert a Bevy world position into a glyph view point
pub fn point_from_world(position: BevyVec2) -> Point {
    Point::new(position.x as f64, position.y as f64)
}

/// Convert a glyph view point into a Bevy world position
pub fn world_from_point(point: Point) -> BevyVec2 {
    BevyVec2::new(point.x as f32, point.y as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_contains_includes_edges() {
        let rect = overlay_box(Point::new(0.0, 0.0), 100.0);
        assert!(closed_contains(rect, Point::new(0.0, 0.0)));
        assert!(closed_contains(rect, Point::new(100.0, 100.0)));
        assert!(closed_contains(rect, Point::new(100.0, 0.0)));
        assert!(!closed_contains(rect, Point::new(100.1, 50.0)));
        assert!(!closed_contains(rect, Point::new(50.0, -0.1)));
    }

    #[test]
    fn test_negative_side_never_contains() {
        let rect = overlay_box(Point::new(0.0, 0.0), -50.0);
        assert!(!closed_contains(rect, Point::new(-25.0, -25.0)));
        assert!(!closed_contains(rect, Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_zero_side_is_a_single_point() {
        let rect = overlay_box(Point::new(10.0, 20.0), 0.0);
        assert!(closed_contains(rect, Point::new(10.0, 20.0)));
        assert!(!closed_contains(rect, Point::new(10.0, 20.5)));
    }

    #[test]
    fn test_world_conversion() {
        let world = BevyVec2::new(12.5, -3.0);
        let point = point_from_world(world);
        assert_eq!(point, Point::new(12.5, -3.0));
        assert_eq!(world_from_point(point), world);
    }
}
