//! Material textures
//!
//! A [`MaterialTexture`] is the pixel buffer a material renderer produced for one
//! material on one shape. Texel rows run along +v: row 0 is sampled at the
//! bottom edge of the shape's bounding box (v = 0).

use std::path::Path;

use image::RgbaImage;
use thiserror::Error;

/// Texture errors
#[derive(Error, Debug)]
pub enum TextureError {
    /// Raw pixel data does not match the stated dimensions
    #[error("Pixel buffer of {len} bytes does not fit {width}x{height} RGBA")]
    SizeMismatch {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Actual buffer length
        len: usize,
    },

    /// Writing the texture to disk failed
    #[error("Failed to export texture: {0}")]
    Export(#[from] image::ImageError),
}

/// RGBA8 texture produced by a material renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialTexture {
    image: RgbaImage,
}

impl MaterialTexture {
    /// Wrap an existing image
    pub const fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Build from raw RGBA bytes
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, TextureError> {
        let len = data.len();
        RgbaImage::from_raw(width, height, data)
            .map(Self::new)
            .ok_or(TextureError::SizeMismatch { width, height, len })
    }

    /// Single-colour texture (useful for testing and placeholders)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self::new(RgbaImage::from_pixel(width, height, image::Rgba(color)))
    }

    /// Texture width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Texture height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Width and height in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Colour of a single texel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (x < self.width() && y < self.height()).then(|| self.image.get_pixel(x, y).0)
    }

    /// Raw RGBA bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Underlying image
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Write the texture as a PNG
    ///
    /// Rows are flipped so the file reads upright in an image viewer.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), TextureError> {
        let path = path.as_ref();
        image::imageops::flip_vertical(&self.image)
            .save_with_format(path, image::ImageFormat::Png)?;
        log::info!("Exported {}x{} texture to {:?}", self.width(), self.height(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_texture() {
        let texture = MaterialTexture::solid_color(4, 2, [255, 0, 0, 255]);
        assert_eq!(texture.dimensions(), (4, 2));
        assert_eq!(texture.as_raw().len(), 4 * 2 * 4);
        assert_eq!(texture.pixel(3, 1), Some([255, 0, 0, 255]));
        assert_eq!(texture.pixel(4, 0), None);
    }

    #[test]
    fn test_from_rgba_checks_size() {
        assert!(MaterialTexture::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            MaterialTexture::from_rgba(2, 2, vec![0; 15]),
            Err(TextureError::SizeMismatch { len: 15, .. })
        ));
    }

    #[test]
    fn test_png_export_is_flipped() {
        let mut data = vec![0u8; 2 * 4];
        data[..4].copy_from_slice(&[10, 20, 30, 255]);
        data[4..].copy_from_slice(&[40, 50, 60, 255]);
        let texture = MaterialTexture::from_rgba(1, 2, data).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("texture.png");
        texture.save_png(&path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded.get_pixel(0, 0).0, [40, 50, 60, 255]);
        assert_eq!(reloaded.get_pixel(0, 1).0, [10, 20, 30, 255]);
    }
}
