//! Math utilities and types
//!
//! Provides the 2D math types used for boundary polygons and mesh vertices.
//! Public data is `f32`, matching what ends up in vertex buffers; geometric
//! predicates widen to `f64` internally.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Double precision point used by geometric predicates
pub type Point2d = nalgebra::Point2<f64>;

/// Widen a point to double precision
pub fn to_f64(point: &Point2) -> Point2d {
    Point2d::new(f64::from(point.x), f64::from(point.y))
}

/// Math utility functions
pub mod utils {
    use super::Point2d;

    /// Twice the signed area of the triangle `(a, b, c)`
    ///
    /// Positive when the corners are counter-clockwise in a y-up frame.
    pub fn orient2d(a: &Point2d, b: &Point2d, c: &Point2d) -> f64 {
        (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
    }

    /// Incircle predicate
    ///
    /// For a counter-clockwise triangle `(a, b, c)`, returns a positive value when
    /// `d` lies strictly inside its circumcircle, negative when outside and zero
    /// when the four points are cocircular.
    pub fn incircle(a: &Point2d, b: &Point2d, c: &Point2d, d: &Point2d) -> f64 {
        let adx = a.x - d.x;
        let ady = a.y - d.y;
        let bdx = b.x - d.x;
        let bdy = b.y - d.y;
        let cdx = c.x - d.x;
        let cdy = c.y - d.y;

        let ad = adx * adx + ady * ady;
        let bd = bdx * bdx + bdy * bdy;
        let cd = cdx * cdx + cdy * cdy;

        adx * (bdy * cd - bd * cdy) - ady * (bdx * cd - bd * cdx) + ad * (bdx * cdy - bdy * cdx)
    }
}

#[cfg(test)]
mod tests {
    use super::utils::{incircle, orient2d};
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_orientation_sign() {
        let a = Point2d::new(0.0, 0.0);
        let b = Point2d::new(1.0, 0.0);
        let c = Point2d::new(0.0, 1.0);

        assert!(orient2d(&a, &b, &c) > 0.0);
        assert!(orient2d(&a, &c, &b) < 0.0);
        assert_relative_eq!(orient2d(&a, &b, &Point2d::new(2.0, 0.0)), 0.0);
    }

    #[test]
    fn test_incircle() {
        let a = Point2d::new(-1.0, 0.0);
        let b = Point2d::new(1.0, 0.0);
        let c = Point2d::new(0.0, 1.0);

        assert!(incircle(&a, &b, &c, &Point2d::new(0.0, 0.0)) > 0.0);
        assert!(incircle(&a, &b, &c, &Point2d::new(0.0, -3.0)) < 0.0);
        assert_relative_eq!(incircle(&a, &b, &c, &Point2d::new(0.0, -1.0)), 0.0);
    }

    #[test]
    fn test_widening() {
        let p = to_f64(&Point2::new(1.5, -2.25));
        assert_relative_eq!(p.x, 1.5);
        assert_relative_eq!(p.y, -2.25);
    }
}
