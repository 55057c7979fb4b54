//! Constrained polygon triangulation
//!
//! Ear clipping produces an initial triangulation of a simple ring. Lawson edge
//! flips then make every interior edge locally Delaunay. Boundary edges are
//! constraints and are never flipped, so the result still covers exactly the
//! polygon with `n - 2` triangles and introduces no Steiner points.
//!
//! Triangles are index triples into the input ring, counter-clockwise in a y-up
//! frame whatever the winding of the input.

use std::collections::HashMap;

use crate::foundation::math::{utils::{incircle, orient2d}, Point2d};
use super::error::DegenerateReason;
use super::polygon::signed_area;

/// Triangle corners as indices into the input ring
pub(crate) type Triangle = [usize; 3];

/// Scale-aware tolerances for the floating point predicates
#[derive(Debug, Clone, Copy)]
pub(crate) struct Tolerances {
    /// Signed doubled areas at or below this are treated as zero
    pub area: f64,
    /// Incircle determinants at or below this do not trigger a flip
    pub incircle: f64,
}

impl Tolerances {
    const RELATIVE: f64 = 1e-12;

    /// Tolerances for a polygon whose largest bounding box side is `extent`
    pub fn for_extent(extent: f64) -> Self {
        let squared = extent * extent;
        Self {
            area: Self::RELATIVE * squared,
            incircle: Self::RELATIVE * squared * squared,
        }
    }
}

/// Triangulate a validated simple ring
pub(crate) fn triangulate(points: &[Point2d], tolerances: Tolerances) -> Result<Vec<Triangle>, DegenerateReason> {
    let ring = counter_clockwise_ring(points);
    let mut triangles = clip_ears(points, &ring, tolerances.area)?;
    let flips = make_delaunay(points, &mut triangles, tolerances.incircle);

    log::trace!(
        "Triangulated {} points into {} triangles with {} edge flips",
        points.len(),
        triangles.len(),
        flips
    );

    Ok(triangles)
}

/// Visiting order that walks the ring counter-clockwise
fn counter_clockwise_ring(points: &[Point2d]) -> Vec<usize> {
    let mut ring: Vec<usize> = (0..points.len()).collect();
    if signed_area(points) < 0.0 {
        ring.reverse();
    }
    ring
}

/// Ear clipping over a doubly linked ring
///
/// A strictly convex corner whose triangle holds no other remaining vertex is
/// an ear. When a full lap finds none, a single near-collinear corner may be
/// clipped instead, emitting a zero-area triangle so the count stays `n - 2`.
fn clip_ears(points: &[Point2d], ring: &[usize], flat_tolerance: f64) -> Result<Vec<Triangle>, DegenerateReason> {
    let n = ring.len();
    let mut prev: Vec<usize> = (0..n).map(|i| (i + n - 1) % n).collect();
    let mut next: Vec<usize> = (0..n).map(|i| (i + 1) % n).collect();
    let mut triangles = Vec::with_capacity(n.saturating_sub(2));

    let mut remaining = n;
    let mut current = 0;
    let mut misses = 0;
    let mut accept_flat = false;

    while remaining > 3 {
        let (before, after) = (prev[current], next[current]);

        let clippable = if accept_flat {
            let corner = orient2d(&points[ring[before]], &points[ring[current]], &points[ring[after]]);
            corner.abs() <= flat_tolerance
        } else {
            is_ear(points, ring, &next, before, current, after)
        };

        if clippable {
            triangles.push([ring[before], ring[current], ring[after]]);
            next[before] = after;
            prev[after] = before;
            remaining -= 1;
            misses = 0;
            accept_flat = false;
            // The corner at `before` just changed; look at it again first.
            current = before;
        } else {
            current = after;
            misses += 1;
            if misses >= remaining {
                if accept_flat {
                    return Err(DegenerateReason::TriangulationFailed { remaining });
                }
                log::debug!("No strict ear among {remaining} vertices, clipping a flat corner");
                accept_flat = true;
                misses = 0;
            }
        }
    }

    triangles.push([ring[prev[current]], ring[current], ring[next[current]]]);
    Ok(triangles)
}

fn is_ear(points: &[Point2d], ring: &[usize], next: &[usize], before: usize, current: usize, after: usize) -> bool {
    let a = points[ring[before]];
    let b = points[ring[current]];
    let c = points[ring[after]];

    if orient2d(&a, &b, &c) <= 0.0 {
        return false;
    }

    let mut v = next[after];
    while v != before {
        if in_closed_triangle(&a, &b, &c, &points[ring[v]]) {
            return false;
        }
        v = next[v];
    }
    true
}

/// Containment test for a counter-clockwise triangle, boundary included
fn in_closed_triangle(a: &Point2d, b: &Point2d, c: &Point2d, p: &Point2d) -> bool {
    orient2d(a, b, p) >= 0.0 && orient2d(b, c, p) >= 0.0 && orient2d(c, a, p) >= 0.0
}

/// Lawson flips until every unconstrained edge is locally Delaunay
///
/// Returns the number of flips performed. Triangles are visited in index order
/// and the edge table is only used for lookups, so the result is deterministic.
fn make_delaunay(points: &[Point2d], triangles: &mut [Triangle], tolerance: f64) -> usize {
    let n = points.len();
    let is_boundary = |a: usize, b: usize| (a + 1) % n == b || (b + 1) % n == a;

    // Directed edge -> triangle holding it.
    let mut owners: HashMap<(usize, usize), usize> = HashMap::with_capacity(triangles.len() * 3);
    for (index, triangle) in triangles.iter().enumerate() {
        register(&mut owners, triangle, index);
    }

    let max_flips = n * n;
    let mut flips = 0;

    loop {
        let mut flipped = false;

        for t in 0..triangles.len() {
            for k in 0..3 {
                let triangle = triangles[t];
                let (a, b, c) = (triangle[k], triangle[(k + 1) % 3], triangle[(k + 2) % 3]);
                if is_boundary(a, b) {
                    continue;
                }
                let Some(&u) = owners.get(&(b, a)) else {
                    continue;
                };
                let Some(d) = triangles[u].into_iter().find(|&v| v != a && v != b) else {
                    continue;
                };

                let (pa, pb, pc, pd) = (points[a], points[b], points[c], points[d]);
                if orient2d(&pa, &pb, &pc) <= 0.0 || orient2d(&pb, &pa, &pd) <= 0.0 {
                    continue;
                }
                if incircle(&pa, &pb, &pc, &pd) <= tolerance {
                    continue;
                }
                // The quad a-d-b-c must be strictly convex for the flip to stay inside it.
                if orient2d(&pa, &pd, &pc) <= 0.0 || orient2d(&pd, &pb, &pc) <= 0.0 {
                    continue;
                }

                owners.remove(&(a, b));
                owners.remove(&(b, a));
                triangles[t] = [a, d, c];
                triangles[u] = [d, b, c];
                register(&mut owners, &triangles[t], t);
                register(&mut owners, &triangles[u], u);

                flips += 1;
                flipped = true;
                break;
            }

            if flips >= max_flips {
                log::warn!("Edge flipping stopped after {flips} flips without converging");
                return flips;
            }
        }

        if !flipped {
            return flips;
        }
    }
}

fn register(owners: &mut HashMap<(usize, usize), usize>, triangle: &Triangle, index: usize) {
    for k in 0..3 {
        owners.insert((triangle[k], triangle[(k + 1) % 3]), index);
    }
}
