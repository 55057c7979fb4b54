//! Polygon mesher
//!
//! Turns a boundary ring into a flat, triangle-major vertex list ready for a
//! vertex buffer. Every vertex carries a texture coordinate relative to the
//! polygon's bounding box, so a material texture rendered for that box is
//! stretched exactly across the shape whatever its outline.
//!
//! Triangles are emitted counter-clockwise in a y-up frame regardless of the
//! input winding; backends that cull should treat counter-clockwise as front
//! facing.

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{to_f64, utils::orient2d, Point2, Point2d};
use super::error::{DegenerateReason, MeshError};
use super::polygon::{validate_ring, Aabb};
use super::triangulation::{triangulate, Tolerances};

/// Mesh vertex: position in the z = 0 plane plus bounding-box texture coordinate
///
/// `#[repr(C)]` and `Pod` so a vertex slice can be uploaded as raw bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Position in 3D space (z is always 0)
    pub position: [f32; 3],

    /// Texture coordinates in `[0, 1] x [0, 1]`
    pub tex_coord: [f32; 2],
}

impl MeshVertex {
    /// Create a vertex from a 2D position and its texture coordinate
    pub fn new(position: Point2, tex_coord: [f32; 2]) -> Self {
        Self {
            position: [position.x, position.y, 0.0],
            tex_coord,
        }
    }

    /// Position projected back onto the plane
    pub fn position_2d(&self) -> Point2 {
        Point2::new(self.position[0], self.position[1])
    }
}

/// Triangle mesh produced from a boundary polygon
///
/// Vertices come in consecutive runs of three, one run per triangle. A mesh is
/// never edited after creation; a changed polygon gets a new mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonMesh {
    vertices: Vec<MeshVertex>,
    triangle_count: usize,
    bounds: Aabb,
}

impl PolygonMesh {
    /// Flattened vertex list, three vertices per triangle
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    /// Number of triangles
    pub const fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    /// Number of vertices (always three per triangle)
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Bounding box the texture coordinates were derived from
    pub const fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Iterate over triangles as vertex triples
    pub fn triangles(&self) -> impl Iterator<Item = &[MeshVertex]> {
        self.vertices.chunks_exact(3)
    }

    /// Total area covered by the triangles
    pub fn area(&self) -> f64 {
        self.triangles()
            .map(|corners| {
                let [a, b, c] = [0, 1, 2].map(|i| to_f64(&corners[i].position_2d()));
                orient2d(&a, &b, &c).abs() * 0.5
            })
            .sum()
    }

    /// Raw vertex bytes for buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Stateless polygon mesher
pub struct PolygonMesher;

impl PolygonMesher {
    /// Triangulate a simple polygon and derive bounding-box texture coordinates
    ///
    /// # Arguments
    /// * `points` - Boundary ring in winding order, closing edge implied
    ///
    /// # Errors
    /// `MeshError::DegeneratePolygon` when the ring has fewer than three points,
    /// a non-finite coordinate, coincident consecutive points, a zero-width or
    /// zero-height bounding box, zero area, or intersecting edges.
    pub fn mesh(points: &[Point2]) -> Result<PolygonMesh, MeshError> {
        if points.len() < 3 {
            return Err(DegenerateReason::TooFewPoints { count: points.len() }.into());
        }

        let (ring, bounds) = Self::prepare(points)?;
        if bounds.is_degenerate() {
            return Err(DegenerateReason::ZeroExtent.into());
        }

        let extent = bounds.extent();
        let tolerances = Tolerances::for_extent(f64::from(extent.x.max(extent.y)));
        validate_ring(&ring, tolerances.area)?;

        let triangles = triangulate(&ring, tolerances)?;

        let vertices: Vec<MeshVertex> = triangles
            .iter()
            .flatten()
            .map(|&index| {
                let position = points[index];
                MeshVertex::new(position, bounds.normalize(&position))
            })
            .collect();

        log::debug!(
            "Meshed {} boundary points into {} triangles ({} vertices)",
            points.len(),
            triangles.len(),
            vertices.len()
        );

        Ok(PolygonMesh {
            vertices,
            triangle_count: triangles.len(),
            bounds,
        })
    }

    /// Single pass over the input: finiteness, bounding box and widening
    fn prepare(points: &[Point2]) -> Result<(Vec<Point2d>, Aabb), DegenerateReason> {
        let mut bounds = Aabb::new(points[0], points[0]);
        let mut ring = Vec::with_capacity(points.len());

        for (index, point) in points.iter().enumerate() {
            if !point.x.is_finite() || !point.y.is_finite() {
                return Err(DegenerateReason::NonFinitePoint { index });
            }
            bounds.include(point);
            ring.push(to_f64(point));
        }

        Ok((ring, bounds))
    }
}
