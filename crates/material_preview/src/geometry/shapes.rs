//! Preview shapes
//!
//! The two boundary polygons a preview session starts with: a rectangle that
//! fills the viewport and a hand-authored non-convex sample outline.

use crate::foundation::math::Point2;
use super::polygon::BoundaryPolygon;

/// Name of the viewport-filling rectangle
pub const SCREEN_RECTANGLE: &str = "screen rectangle";

/// Name of the hand-authored sample outline
pub const SAMPLE_POLYGON: &str = "sample polygon";

/// Thirteen-point star-like outline, counter-clockwise, in world units
pub const SAMPLE_POLYGON_POINTS: [[f32; 2]; 13] = [
    [0.0, 4.0],
    [-0.93, 1.77],
    [-2.96, 2.05],
    [-1.79, 0.22],
    [-3.93, -1.49],
    [-1.46, -1.65],
    [-0.77, -3.11],
    [0.38, -1.55],
    [2.52, -2.84],
    [2.24, -0.85],
    [3.97, 0.48],
    [1.56, 1.08],
    [1.3, 2.48],
];

/// Rectangle centred on the origin covering a `width` x `height` pixel viewport
///
/// `pixels_per_unit` is the world-to-pixel scale, so the rectangle spans
/// `width / pixels_per_unit` world units horizontally and keeps the viewport's
/// aspect ratio.
pub fn screen_rectangle(width: u32, height: u32, pixels_per_unit: f32) -> BoundaryPolygon {
    let half_width = width as f32 / pixels_per_unit * 0.5;
    let half_height = height as f32 / pixels_per_unit * 0.5;

    BoundaryPolygon::new(
        SCREEN_RECTANGLE,
        vec![
            Point2::new(-half_width, -half_height),
            Point2::new(half_width, -half_height),
            Point2::new(half_width, half_height),
            Point2::new(-half_width, half_height),
        ],
    )
}

/// The built-in sample outline
pub fn sample_polygon() -> BoundaryPolygon {
    BoundaryPolygon::from_coords(SAMPLE_POLYGON, &SAMPLE_POLYGON_POINTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_screen_rectangle_keeps_aspect_ratio() {
        let rect = screen_rectangle(800, 400, 40.0);
        let bounds = rect.bounds().unwrap();

        assert_eq!(rect.name(), SCREEN_RECTANGLE);
        assert_relative_eq!(bounds.extent().x, 20.0);
        assert_relative_eq!(bounds.extent().y, 10.0);
        assert!(rect.signed_area() > 0.0);
    }

    #[test]
    fn test_sample_polygon_is_non_convex() {
        let sample = sample_polygon();
        assert_eq!(sample.len(), 13);
        assert!(sample.signed_area() > 0.0);

        // The origin sits inside; the notch between the first two tips does not.
        assert!(sample.contains_point(&Point2::new(0.0, 0.0)));
        assert!(!sample.contains_point(&Point2::new(-1.5, 2.5)));
    }
}
