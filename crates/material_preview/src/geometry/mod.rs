//! Geometry module - boundary polygons and the polygon mesher
//!
//! - [`BoundaryPolygon`] and [`Aabb`]: the shapes being previewed
//! - [`PolygonMesher`]: triangulation plus bounding-box UV mapping
//! - [`shapes`]: the default preview shapes

pub mod error;
pub mod mesher;
pub mod polygon;
pub mod shapes;
mod triangulation;

pub use error::{DegenerateReason, MeshError};
pub use mesher::{MeshVertex, PolygonMesh, PolygonMesher};
pub use polygon::{point_in_ring, Aabb, BoundaryPolygon};
