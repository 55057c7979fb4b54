//! Material renderers
//!
//! A material renderer turns one material definition plus one shape outline
//! into a texture covering the outline's bounding box. The preview session only
//! talks to the [`MaterialRenderer`] trait; [`SwatchRenderer`] is the built-in
//! implementation that fills the shape with the material's `color` attribute.

use thiserror::Error;

use crate::assets::MaterialDefinition;
use crate::foundation::math::Point2;
use crate::geometry::{point_in_ring, Aabb};
use super::texture::MaterialTexture;

/// Rendering errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The renderer could not produce a texture for a material
    #[error("Failed to render material '{uid}': {reason}")]
    MaterialRenderFailure {
        /// Uid of the material being rendered
        uid: String,
        /// Renderer-specific explanation
        reason: String,
    },
}

impl RenderError {
    /// Build a failure for `material`
    pub fn failure(material: &MaterialDefinition, reason: impl Into<String>) -> Self {
        Self::MaterialRenderFailure {
            uid: material.uid().to_string(),
            reason: reason.into(),
        }
    }
}

/// Everything a renderer needs for one texture
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    /// Material to render
    pub material: &'a MaterialDefinition,
    /// Outline of the active shape in world units
    pub shape: &'a [Point2],
    /// Texture pixels per world unit
    pub scale: f32,
    /// Trade fidelity for speed
    pub preview_quality: bool,
}

/// Produces material textures on demand
pub trait MaterialRenderer {
    /// Render `request.material` over the bounding box of `request.shape`
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<MaterialTexture, RenderError>;
}

/// Colour used when a material has no `color` attribute
pub const DEFAULT_SWATCH_COLOR: [u8; 4] = [128, 128, 128, 255];

/// Flat-colour renderer
///
/// Fills the shape with the material's `color` attribute (`#rrggbb` or
/// `#rrggbbaa`) and leaves texels outside the outline transparent. Edge texels
/// are 2x2 supersampled unless preview quality is requested.
#[derive(Debug, Clone)]
pub struct SwatchRenderer {
    max_dimension: u32,
}

impl Default for SwatchRenderer {
    fn default() -> Self {
        Self::new(2048)
    }
}

impl SwatchRenderer {
    /// Create a renderer whose textures never exceed `max_dimension` on either axis
    pub fn new(max_dimension: u32) -> Self {
        Self {
            max_dimension: max_dimension.max(1),
        }
    }

    /// Largest texture side this renderer will produce
    pub const fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    fn texture_size(&self, bounds: &Aabb, scale: f32) -> (u32, u32) {
        let extent = bounds.extent();
        let side = |length: f32| ((length * scale).ceil() as u32).clamp(1, self.max_dimension);
        (side(extent.x), side(extent.y))
    }

    /// Fraction of the texel `(x, y)` of a `size` texture covered by the shape
    ///
    /// Samples sit on a `samples` x `samples` grid inside the texel.
    fn coverage(shape: &[Point2], bounds: &Aabb, texel: (u32, u32), size: (u32, u32), samples: u32) -> f32 {
        let extent = bounds.extent();
        let step = 1.0 / samples as f32;
        let mut covered = 0u32;

        for sy in 0..samples {
            for sx in 0..samples {
                let u = (texel.0 as f32 + (sx as f32 + 0.5) * step) / size.0 as f32;
                let v = (texel.1 as f32 + (sy as f32 + 0.5) * step) / size.1 as f32;
                let point = Point2::new(bounds.min.x + u * extent.x, bounds.min.y + v * extent.y);
                if point_in_ring(shape, &point) {
                    covered += 1;
                }
            }
        }

        covered as f32 / (samples * samples) as f32
    }
}

impl MaterialRenderer for SwatchRenderer {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<MaterialTexture, RenderError> {
        let material = request.material;
        if !(request.scale.is_finite() && request.scale > 0.0) {
            return Err(RenderError::failure(
                material,
                format!("scale must be positive, got {}", request.scale),
            ));
        }

        let bounds = Aabb::from_points(request.shape)
            .filter(|bounds| !bounds.is_degenerate())
            .ok_or_else(|| RenderError::failure(material, "shape has no area"))?;

        let color = match material.attribute("color") {
            Some(value) => parse_color(value).ok_or_else(|| {
                RenderError::failure(material, format!("invalid color '{value}'"))
            })?,
            None => DEFAULT_SWATCH_COLOR,
        };

        let (width, height) = self.texture_size(&bounds, request.scale);
        let samples = if request.preview_quality { 1 } else { 2 };

        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let coverage = Self::coverage(request.shape, &bounds, (x, y), (width, height), samples);
                let alpha = (f32::from(color[3]) * coverage).round() as u8;
                if alpha == 0 {
                    data.extend_from_slice(&[0, 0, 0, 0]);
                } else {
                    data.extend_from_slice(&[color[0], color[1], color[2], alpha]);
                }
            }
        }

        log::debug!(
            "Rendered material '{}' as {}x{} swatch ({} sample(s) per texel)",
            material.uid(),
            width,
            height,
            samples * samples
        );

        MaterialTexture::from_rgba(width, height, data)
            .map_err(|e| RenderError::failure(material, e.to_string()))
    }
}

/// Parse `#rrggbb` or `#rrggbbaa`
pub fn parse_color(value: &str) -> Option<[u8; 4]> {
    let hex = value.trim().strip_prefix('#')?;
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok();
    let alpha = if hex.len() == 8 { channel(3)? } else { 255 };
    Some([channel(0)?, channel(1)?, channel(2)?, alpha])
}
