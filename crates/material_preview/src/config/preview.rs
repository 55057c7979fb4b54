//! Preview application configuration
//!
//! Everything the preview session needs that is not a material: viewport size,
//! the world-to-pixel scale used to build the screen rectangle, renderer
//! settings, menu layout and the sample outline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::geometry::{shapes, BoundaryPolygon};

/// Viewport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
    /// Window title
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            title: "Material Previewer".to_string(),
        }
    }
}

/// Arguments forwarded to the material renderer with every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Texture pixels per world unit
    pub scale: f32,
    /// Let the renderer trade fidelity for speed
    pub preview_quality: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            scale: 35.0,
            preview_quality: false,
        }
    }
}

/// Screen positions for the help overlay and the material menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuLayout {
    /// Top-left corner of the header / help text
    pub header_position: [f32; 2],
    /// Top-left corner of the first material entry
    pub list_offset: [f32; 2],
    /// Vertical distance between entries
    pub line_spacing: f32,
}

impl Default for MenuLayout {
    fn default() -> Self {
        Self {
            header_position: [16.0, 16.0],
            list_offset: [22.0, 46.0],
            line_spacing: 15.0,
        }
    }
}

/// Top-level preview configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Viewport settings
    pub window: WindowConfig,
    /// World-to-pixel scale used to size the screen rectangle
    pub pixels_per_unit: f32,
    /// Material library file (RON)
    pub material_library: PathBuf,
    /// Renderer arguments
    pub render: RenderSettings,
    /// Overlay layout
    pub menu: MenuLayout,
    /// Where to write the current texture after each successful render
    pub export_path: Option<PathBuf>,
    /// Outline of the sample shape in world units
    pub sample_polygon: Vec<[f32; 2]>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            pixels_per_unit: 35.0,
            material_library: PathBuf::from("materials.ron"),
            render: RenderSettings::default(),
            menu: MenuLayout::default(),
            export_path: None,
            sample_polygon: shapes::SAMPLE_POLYGON_POINTS.to_vec(),
        }
    }
}

impl Config for PreviewConfig {}

impl PreviewConfig {
    /// Check ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if !(self.pixels_per_unit.is_finite() && self.pixels_per_unit > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "pixels_per_unit must be positive, got {}",
                self.pixels_per_unit
            )));
        }
        if !(self.render.scale.is_finite() && self.render.scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "render.scale must be positive, got {}",
                self.render.scale
            )));
        }
        if self.sample_polygon.len() < 3 {
            return Err(ConfigError::Invalid(format!(
                "sample_polygon needs at least 3 points, got {}",
                self.sample_polygon.len()
            )));
        }
        Ok(())
    }

    /// Anchor relative file paths at `base`, normally the config file's directory
    ///
    /// Absolute paths are left alone.
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.material_library.is_relative() {
            self.material_library = base.join(&self.material_library);
        }
        if let Some(path) = self.export_path.as_mut().filter(|path| path.is_relative()) {
            *path = base.join(&*path);
        }
    }

    /// The ordered shapes a preview session starts with
    pub fn shapes(&self) -> Vec<BoundaryPolygon> {
        vec![
            shapes::screen_rectangle(self.window.width, self.window.height, self.pixels_per_unit),
            BoundaryPolygon::from_coords(shapes::SAMPLE_POLYGON, &self.sample_polygon),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = PreviewConfig::default();
        assert!(config.validate().is_ok());

        let shapes = config.shapes();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].name(), shapes::SCREEN_RECTANGLE);
        assert_eq!(shapes[1].len(), 13);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = PreviewConfig::default();
        config.window.width = 1024;
        config.export_path = Some(PathBuf::from("out.png"));

        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        config.save_to_file(file.path()).unwrap();
        let loaded = PreviewConfig::load_from_file(file.path()).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let mut file = tempfile::Builder::new().suffix(".ron").tempfile().unwrap();
        write!(file, "(pixels_per_unit: 20.0, render: (scale: 10.0))").unwrap();

        let loaded = PreviewConfig::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.pixels_per_unit, 20.0);
        assert_eq!(loaded.render.scale, 10.0);
        assert!(!loaded.render.preview_quality);
        assert_eq!(loaded.window, WindowConfig::default());
    }

    #[test]
    fn test_unsupported_extension() {
        let file = NamedTempFile::new().unwrap();
        let result = PreviewConfig::load_from_file(file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = PreviewConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, PreviewConfig::default());
    }

    #[test]
    fn test_relative_paths_follow_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("preview.toml");
        let mut config = PreviewConfig::default();
        config.export_path = Some(PathBuf::from("out/swatch.png"));
        config.save_to_file(&config_path).unwrap();

        let mut loaded = PreviewConfig::load_from_file(&config_path).unwrap();
        loaded.resolve_paths(config_path.parent().unwrap());

        assert_eq!(loaded.material_library, dir.path().join("materials.ron"));
        assert_eq!(loaded.export_path, Some(dir.path().join("out/swatch.png")));

        let absolute = dir.path().join("elsewhere.ron");
        loaded.material_library = absolute.clone();
        loaded.resolve_paths(Path::new("ignored"));
        assert_eq!(loaded.material_library, absolute);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = PreviewConfig::default();
        config.pixels_per_unit = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = PreviewConfig::default();
        config.window.height = 0;
        assert!(config.validate().is_err());
    }
}
