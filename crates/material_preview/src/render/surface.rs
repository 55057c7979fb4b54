//! Display surface interface
//!
//! Defines what the preview session needs from a window or graphics device.
//! Keeps the session independent of any particular windowing or GPU backend.

use thiserror::Error;

use crate::geometry::PolygonMesh;
use super::texture::MaterialTexture;

/// RGBA colour with components in `[0, 1]`
pub type Color = [f32; 4];

/// Common colours
pub mod colors {
    use super::Color;

    /// Opaque black
    pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
    /// Opaque white
    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    /// Selection highlight
    pub const DARK_RED: Color = [0.545, 0.0, 0.0, 1.0];
}

/// Surface errors reported by backends
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// The backend failed to execute a draw call
    #[error("Draw call failed: {0}")]
    Backend(String),
}

/// A line of text at a screen position (pixels, origin top-left)
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    /// Text to draw
    pub text: String,
    /// Top-left corner
    pub position: [f32; 2],
    /// Text colour
    pub color: Color,
}

impl TextLabel {
    /// Create a label
    pub fn new(text: impl Into<String>, position: [f32; 2], color: Color) -> Self {
        Self {
            text: text.into(),
            position,
            color,
        }
    }
}

/// Backend-agnostic drawing interface
pub trait DisplaySurface {
    /// Clear the frame to `color`
    fn clear(&mut self, color: Color) -> Result<(), SurfaceError>;

    /// Draw `mesh` with `texture` bound
    fn draw_mesh(&mut self, mesh: &PolygonMesh, texture: &MaterialTexture) -> Result<(), SurfaceError>;

    /// Fill a screen-space rectangle
    ///
    /// # Arguments
    /// * `position` - Top-left corner in pixels
    /// * `size` - Width and height in pixels
    fn fill_rect(&mut self, position: [f32; 2], size: [f32; 2], color: Color) -> Result<(), SurfaceError>;

    /// Draw a line of text
    fn draw_text(&mut self, label: &TextLabel) -> Result<(), SurfaceError>;

    /// Width and height `text` would occupy when drawn
    fn measure_text(&self, text: &str) -> [f32; 2];
}

/// A draw call captured by [`CommandRecorder`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Frame clear
    Clear(Color),
    /// Textured mesh
    Mesh {
        /// Triangles submitted
        triangle_count: usize,
        /// Bound texture size
        texture_size: (u32, u32),
    },
    /// Solid rectangle
    Rect {
        /// Top-left corner
        position: [f32; 2],
        /// Width and height
        size: [f32; 2],
        /// Fill colour
        color: Color,
    },
    /// Text line
    Text(TextLabel),
}

/// Surface that records draw calls instead of executing them
///
/// Text is measured as a fixed-width font. Used by the console driver and in
/// tests.
#[derive(Debug, Clone)]
pub struct CommandRecorder {
    glyph_size: [f32; 2],
    commands: Vec<DrawCommand>,
}

impl Default for CommandRecorder {
    fn default() -> Self {
        Self::new([7.0, 13.0])
    }
}

impl CommandRecorder {
    /// Create a recorder measuring text with `glyph_size` per character
    pub const fn new(glyph_size: [f32; 2]) -> Self {
        Self {
            glyph_size,
            commands: Vec::new(),
        }
    }

    /// Commands recorded since the last [`take_commands`](Self::take_commands)
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl DisplaySurface for CommandRecorder {
    fn clear(&mut self, color: Color) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::Clear(color));
        Ok(())
    }

    fn draw_mesh(&mut self, mesh: &PolygonMesh, texture: &MaterialTexture) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::Mesh {
            triangle_count: mesh.triangle_count(),
            texture_size: texture.dimensions(),
        });
        Ok(())
    }

    fn fill_rect(&mut self, position: [f32; 2], size: [f32; 2], color: Color) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::Rect { position, size, color });
        Ok(())
    }

    fn draw_text(&mut self, label: &TextLabel) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::Text(label.clone()));
        Ok(())
    }

    fn measure_text(&self, text: &str) -> [f32; 2] {
        let lines = text.lines().count().max(1);
        let columns = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
        [
            columns as f32 * self.glyph_size[0],
            lines as f32 * self.glyph_size[1],
        ]
    }
}
