//! Mapping between pixel space, normalized chart space and percentage
//! layout offsets.
//!
//! The rect passed in is assumed to already reflect any pan/zoom applied by
//! the renderer, so everything here is plain rectangle-relative arithmetic.

use serde::{Deserialize, Serialize};

use crate::ir::{Position, PixelRect};

/// CSS-style percentage offsets of a point from the chart's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentOffset {
    pub left: f32,
    pub top: f32,
}

impl PercentOffset {
    pub fn left_css(&self) -> String {
        percent_string(self.left)
    }

    pub fn top_css(&self) -> String {
        percent_string(self.top)
    }
}

fn percent_string(value: f32) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    format!("{rounded}%")
}

/// Convert a pointer position to a normalized chart position.
///
/// `inset_px` is usually the on-screen dot radius: the result is clamped to
/// `[inset, 1 - inset]` so the dot's edge, not just its center, stays inside
/// the chart. A zero-size axis maps to the midpoint.
pub fn pixel_to_normalized(
    pixel_x: f32,
    pixel_y: f32,
    rect: &PixelRect,
    inset_px: f32,
) -> Position {
    let x = normalized_axis(pixel_x - rect.left, rect.extent_x(), inset_px, false);
    let y = normalized_axis(pixel_y - rect.top, rect.extent_y(), inset_px, true);
    Position::new(x, y)
}

fn normalized_axis(offset: f32, extent: f32, inset_px: f32, invert: bool) -> f32 {
    if extent <= 0.0 {
        return 0.5;
    }
    let relative = offset / extent;
    if !relative.is_finite() {
        return 0.5;
    }
    let relative = if invert { 1.0 - relative } else { relative };
    let inset = inset_fraction(inset_px, extent);
    relative.clamp(inset, 1.0 - inset)
}

// Capped at one half so the clamp range never inverts.
fn inset_fraction(inset_px: f32, extent: f32) -> f32 {
    if extent <= 0.0 || !inset_px.is_finite() {
        return 0.0;
    }
    (inset_px / extent).clamp(0.0, 0.5)
}

pub fn normalized_to_percent(pos: Position) -> PercentOffset {
    PercentOffset {
        left: pos.x() * 100.0,
        top: (1.0 - pos.y()) * 100.0,
    }
}

/// Inverse of the percentage layout: pixel coordinates of an offset inside `rect`.
pub fn percent_to_pixel(offset: PercentOffset, rect: &PixelRect) -> (f32, f32) {
    (
        rect.left + offset.left / 100.0 * rect.extent_x(),
        rect.top + offset.top / 100.0 * rect.extent_y(),
    )
}

pub fn normalized_to_pixel(pos: Position, rect: &PixelRect) -> (f32, f32) {
    percent_to_pixel(normalized_to_percent(pos), rect)
}

/// Inclusive hit test against all four edges of `rect`.
pub fn is_within_graph(pixel_x: f32, pixel_y: f32, rect: &PixelRect) -> bool {
    pixel_x >= rect.left
        && pixel_x <= rect.right()
        && pixel_y >= rect.top
        && pixel_y <= rect.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-4
    }

    #[test]
    fn center_pixel_maps_to_center() {
        let rect = PixelRect::new(100.0, 50.0, 200.0, 200.0);
        let pos = pixel_to_normalized(200.0, 150.0, &rect, 0.0);
        assert!(approx(pos.x(), 0.5) && approx(pos.y(), 0.5), "{pos:?}");
    }

    #[test]
    fn vertical_axis_is_inverted() {
        let rect = PixelRect::square(100.0);
        let top_left = pixel_to_normalized(0.0, 0.0, &rect, 0.0);
        assert_eq!(top_left, Position::new(0.0, 1.0));
        let bottom_right = pixel_to_normalized(100.0, 100.0, &rect, 0.0);
        assert_eq!(bottom_right, Position::new(1.0, 0.0));
    }

    #[test]
    fn inset_keeps_dot_inside() {
        let rect = PixelRect::square(200.0);
        let pos = pixel_to_normalized(-50.0, 500.0, &rect, 10.0);
        assert!(approx(pos.x(), 0.05), "x should clamp to inset, got {}", pos.x());
        assert!(approx(pos.y(), 0.05), "y should clamp to inset, got {}", pos.y());
    }

    #[test]
    fn oversized_inset_pins_to_midpoint() {
        let rect = PixelRect::square(20.0);
        let pos = pixel_to_normalized(0.0, 0.0, &rect, 50.0);
        assert_eq!(pos, Position::CENTER);
    }

    #[test]
    fn zero_size_rect_degrades_to_midpoint() {
        let rect = PixelRect::new(10.0, 10.0, 0.0, 0.0);
        let pos = pixel_to_normalized(10.0, 10.0, &rect, 4.0);
        assert_eq!(pos, Position::CENTER);
    }

    #[test]
    fn zero_width_only_affects_that_axis() {
        let rect = PixelRect::new(0.0, 0.0, 0.0, 100.0);
        let pos = pixel_to_normalized(30.0, 25.0, &rect, 0.0);
        assert_eq!(pos.x(), 0.5);
        assert!(approx(pos.y(), 0.75));
    }

    #[test]
    fn non_finite_pointer_degrades_to_midpoint() {
        let rect = PixelRect::square(100.0);
        let pos = pixel_to_normalized(f32::NAN, f32::INFINITY, &rect, 0.0);
        assert!(pos.x().is_finite() && pos.y().is_finite());
    }

    #[test]
    fn percent_offsets_measure_from_top_left() {
        let offset = normalized_to_percent(Position::new(0.25, 0.75));
        assert!(approx(offset.left, 25.0));
        assert!(approx(offset.top, 25.0));
        assert_eq!(offset.left_css(), "25%");
        assert_eq!(offset.top_css(), "25%");
    }

    #[test]
    fn percent_css_keeps_fractions() {
        let offset = PercentOffset {
            left: 12.5,
            top: 0.0,
        };
        assert_eq!(offset.left_css(), "12.5%");
        assert_eq!(offset.top_css(), "0%");
    }

    #[test]
    fn corners_are_within_graph() {
        let rect = PixelRect::new(10.0, 20.0, 100.0, 50.0);
        for (x, y) in [(10.0, 20.0), (110.0, 20.0), (10.0, 70.0), (110.0, 70.0)] {
            assert!(is_within_graph(x, y, &rect), "corner ({x}, {y}) should be inside");
        }
    }

    #[test]
    fn one_pixel_outside_each_edge_is_rejected() {
        let rect = PixelRect::new(10.0, 20.0, 100.0, 50.0);
        assert!(!is_within_graph(9.0, 40.0, &rect));
        assert!(!is_within_graph(111.0, 40.0, &rect));
        assert!(!is_within_graph(50.0, 19.0, &rect));
        assert!(!is_within_graph(50.0, 71.0, &rect));
    }

    #[test]
    fn normalized_to_pixel_inverts_pixel_to_normalized() {
        let rect = PixelRect::new(40.0, 60.0, 280.0, 280.0);
        let pos = pixel_to_normalized(110.0, 130.0, &rect, 0.0);
        let (x, y) = normalized_to_pixel(pos, &rect);
        assert!(approx(x, 110.0) && approx(y, 130.0), "({x}, {y})");
    }
}
