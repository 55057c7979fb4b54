//! Rendering seams
//!
//! - [`MaterialTexture`]: a rendered material
//! - [`MaterialRenderer`]: material + shape in, texture out
//! - [`DisplaySurface`]: where meshes, rectangles and text end up

pub mod renderer;
pub mod surface;
pub mod texture;

pub use renderer::{parse_color, MaterialRenderer, RenderError, RenderRequest, SwatchRenderer};
pub use surface::{colors, Color, CommandRecorder, DisplaySurface, DrawCommand, SurfaceError, TextLabel};
pub use texture::{MaterialTexture, TextureError};
