//! Meshing errors

use std::fmt;
use thiserror::Error;

/// Why a boundary polygon could not be triangulated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateReason {
    /// Fewer than three boundary points
    TooFewPoints {
        /// Number of points supplied
        count: usize,
    },
    /// A coordinate is NaN or infinite
    NonFinitePoint {
        /// Index of the offending point
        index: usize,
    },
    /// Two consecutive points coincide (including last and first)
    DuplicatePoint {
        /// Index of the first of the two coincident points
        index: usize,
    },
    /// The bounding box has zero width or zero height
    ZeroExtent,
    /// The polygon encloses no area
    ZeroArea,
    /// Two boundary edges cross, touch or overlap
    SelfIntersecting {
        /// Index of the first edge (edge `i` runs from point `i` to point `i + 1`)
        first_edge: usize,
        /// Index of the second edge
        second_edge: usize,
    },
    /// Ear clipping ran out of candidate ears
    TriangulationFailed {
        /// Number of boundary vertices left unclipped
        remaining: usize,
    },
}

impl fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPoints { count } => write!(f, "need at least 3 points, got {count}"),
            Self::NonFinitePoint { index } => write!(f, "point {index} is not finite"),
            Self::DuplicatePoint { index } => {
                write!(f, "point {index} coincides with the point after it")
            }
            Self::ZeroExtent => write!(f, "bounding box has zero width or height"),
            Self::ZeroArea => write!(f, "polygon encloses no area"),
            Self::SelfIntersecting { first_edge, second_edge } => {
                write!(f, "edges {first_edge} and {second_edge} intersect")
            }
            Self::TriangulationFailed { remaining } => {
                write!(f, "no ear found with {remaining} vertices remaining")
            }
        }
    }
}

/// Polygon mesher errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The input geometry cannot be triangulated
    #[error("Degenerate polygon: {0}")]
    DegeneratePolygon(DegenerateReason),
}

impl MeshError {
    /// The underlying reason for a degenerate polygon
    pub const fn reason(&self) -> DegenerateReason {
        match self {
            Self::DegeneratePolygon(reason) => *reason,
        }
    }
}

impl From<DegenerateReason> for MeshError {
    fn from(reason: DegenerateReason) -> Self {
        Self::DegeneratePolygon(reason)
    }
}
