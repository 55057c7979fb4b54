//! Boundary polygons and their bounding boxes
//!
//! A [`BoundaryPolygon`] is an ordered ring of 2D points with an implicit closing
//! edge from the last point back to the first. Insertion order is winding order.
//! Polygons are immutable once built; re-meshing a changed shape means building a
//! new polygon.

use crate::foundation::math::{to_f64, utils::orient2d, Point2, Point2d, Vec2};
use super::error::{DegenerateReason, MeshError};
use super::mesher::{PolygonMesh, PolygonMesher};

/// Axis-aligned bounding box of a point set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Component-wise minimum
    pub min: Point2,
    /// Component-wise maximum
    pub max: Point2,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub const fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// Bounding box of `points`, or `None` when the slice is empty
    pub fn from_points(points: &[Point2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self::new(*first, *first);
        for point in rest {
            bounds.include(point);
        }
        Some(bounds)
    }

    /// Grow the box to contain `point`
    pub fn include(&mut self, point: &Point2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Width and height of the box
    pub fn extent(&self) -> Vec2 {
        self.max - self.min
    }

    /// Whether the box has zero width or zero height
    pub fn is_degenerate(&self) -> bool {
        let extent = self.extent();
        extent.x <= 0.0 || extent.y <= 0.0
    }

    /// Check if this AABB contains a point (boundary included)
    pub fn contains_point(&self, point: &Point2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y
    }

    /// Map a point to box-relative coordinates
    ///
    /// The min corner maps to `[0, 0]` and the max corner to `[1, 1]` exactly.
    /// Callers must not pass a degenerate box.
    pub fn normalize(&self, point: &Point2) -> [f32; 2] {
        [
            (point.x - self.min.x) / (self.max.x - self.min.x),
            (point.y - self.min.y) / (self.max.y - self.min.y),
        ]
    }
}

/// A named, ordered, closed ring of 2D points
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryPolygon {
    name: String,
    points: Vec<Point2>,
}

impl BoundaryPolygon {
    /// Create a polygon from its boundary points in winding order
    pub fn new(name: impl Into<String>, points: Vec<Point2>) -> Self {
        Self { name: name.into(), points }
    }

    /// Create a polygon from `[x, y]` pairs, as stored in config files
    pub fn from_coords(name: impl Into<String>, coords: &[[f32; 2]]) -> Self {
        Self::new(name, coords.iter().map(|&[x, y]| Point2::new(x, y)).collect())
    }

    /// Display name of the shape
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Boundary points in winding order
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Number of boundary points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polygon has no points at all
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box of the boundary points
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.points)
    }

    /// Signed area; positive for counter-clockwise rings in a y-up frame
    pub fn signed_area(&self) -> f64 {
        let widened: Vec<Point2d> = self.points.iter().map(to_f64).collect();
        signed_area(&widened)
    }

    /// Unsigned enclosed area
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Even-odd point containment test
    pub fn contains_point(&self, point: &Point2) -> bool {
        point_in_ring(&self.points, point)
    }

    /// Triangulate this polygon
    pub fn mesh(&self) -> Result<PolygonMesh, MeshError> {
        PolygonMesher::mesh(&self.points)
    }
}

/// Even-odd containment test against a closed ring
pub fn point_in_ring(ring: &[Point2], point: &Point2) -> bool {
    let n = ring.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let a = ring[i];
        let b = ring[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Shoelace signed area of a ring
pub(crate) fn signed_area(points: &[Point2d]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        * 0.5
}

/// Reject rings that are not simple polygons
///
/// Checks consecutive duplicates, folded-back adjacent edges, contact between
/// non-adjacent edges and finally zero area. Quadratic in the number of edges.
pub(crate) fn validate_ring(points: &[Point2d], area_tolerance: f64) -> Result<(), DegenerateReason> {
    let n = points.len();

    for i in 0..n {
        if points[i] == points[(i + 1) % n] {
            return Err(DegenerateReason::DuplicatePoint { index: i });
        }
    }

    for i in 0..n {
        let (a, b) = (points[i], points[(i + 1) % n]);

        // Edge i and edge i + 1 share point i + 1; they may only meet there.
        let c = points[(i + 2) % n];
        if n > 3 && orient2d(&a, &b, &c) == 0.0 && (a - b).dot(&(c - b)) > 0.0 {
            return Err(DegenerateReason::SelfIntersecting {
                first_edge: i,
                second_edge: (i + 1) % n,
            });
        }

        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (c, d) = (points[j], points[(j + 1) % n]);
            if segments_touch(&a, &b, &c, &d) {
                return Err(DegenerateReason::SelfIntersecting { first_edge: i, second_edge: j });
            }
        }
    }

    if signed_area(points).abs() <= area_tolerance {
        return Err(DegenerateReason::ZeroArea);
    }

    Ok(())
}

/// Closed segment intersection test
fn segments_touch(a: &Point2d, b: &Point2d, c: &Point2d, d: &Point2d) -> bool {
    let d1 = orient2d(c, d, a);
    let d2 = orient2d(c, d, b);
    let d3 = orient2d(a, b, c);
    let d4 = orient2d(a, b, d);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(c, d, a))
        || (d2 == 0.0 && on_segment(c, d, b))
        || (d3 == 0.0 && on_segment(a, b, c))
        || (d4 == 0.0 && on_segment(a, b, d))
}

/// Whether a point already known to be collinear with `a`-`b` lies within it
fn on_segment(a: &Point2d, b: &Point2d, p: &Point2d) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}
