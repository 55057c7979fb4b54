//! # Material Preview
//!
//! Interactive previewing of procedural material definitions on arbitrary
//! 2D shapes.
//!
//! ## Features
//!
//! - **Polygon Mesher**: ear clipping plus constrained Delaunay edge flips,
//!   with bounding-box texture coordinates for every vertex
//! - **Preview Session**: shape toggling, material menu, reloadable
//!   definitions, texture ownership
//! - **Backend Seams**: material renderers and display surfaces are traits
//! - **Configuration**: TOML or RON files with defaults for every field
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use material_preview::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PreviewConfig::load_or_default("preview.toml")?;
//!     let materials = MaterialLibrary::load(&config.material_library)?;
//!     let mut session = PreviewSession::from_config(&config, materials, SwatchRenderer::default())?;
//!
//!     session.render_current()?;
//!     session.draw(&mut CommandRecorder::default())?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod geometry;
pub mod input;
pub mod render;
pub mod session;

/// Common imports for preview users
pub mod prelude {
    pub use crate::{
        assets::{MaterialDefinition, MaterialError, MaterialLibrary, MaterialSource},
        config::{Config, ConfigError, PreviewConfig},
        foundation::math::Point2,
        geometry::{BoundaryPolygon, MeshError, PolygonMesh, PolygonMesher},
        input::{KeySet, PreviewKey},
        render::{
            CommandRecorder, DisplaySurface, MaterialRenderer, MaterialTexture, RenderError,
            RenderRequest, SwatchRenderer,
        },
        session::{PreviewSession, SessionError, SessionEvent},
    };
}
