//! Preview session
//!
//! Owns the preview shapes and their meshes, the material source, the material
//! renderer and the current texture. Driven one frame at a time: the caller
//! reports held keys through [`PreviewSession::update`] and then asks the
//! session to [`draw`](PreviewSession::draw) itself onto a display surface.
//!
//! Every shape is meshed at construction; a shape that cannot be meshed makes
//! construction fail and nothing is kept.

pub mod menu;

use thiserror::Error;

use crate::assets::{MaterialDefinition, MaterialError, MaterialSource};
use crate::config::{MenuLayout, PreviewConfig, RenderSettings};
use crate::geometry::{BoundaryPolygon, MeshError, PolygonMesh};
use crate::input::{KeySet, KeyboardTracker, PreviewKey};
use crate::render::{
    colors, DisplaySurface, MaterialRenderer, MaterialTexture, RenderError, RenderRequest, SurfaceError,
};

/// Session errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// A configured shape is not a valid simple polygon
    #[error("Shape '{shape}' cannot be meshed: {source}")]
    Mesh {
        /// Shape name
        shape: String,
        /// Mesher error
        #[source]
        source: MeshError,
    },

    /// The session was given no shapes
    #[error("At least one preview shape is required")]
    NoShapes,

    /// A render was requested with an empty material source
    #[error("No material definitions loaded")]
    NoMaterials,

    /// The material renderer failed
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Reloading material definitions failed
    #[error(transparent)]
    Material(#[from] MaterialError),

    /// The display surface rejected a draw call
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Something that changed during [`PreviewSession::update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The material menu was opened or closed
    MenuToggled {
        /// Whether the menu is now open
        open: bool,
    },
    /// The selected material changed
    SelectionChanged {
        /// New selection
        index: usize,
    },
    /// The active shape changed
    ShapeChanged {
        /// New active shape
        index: usize,
    },
    /// A new texture became current
    Rendered {
        /// Material that was rendered
        uid: String,
    },
    /// Rendering failed; the previous texture is still current
    RenderFailed {
        /// Failure description
        reason: String,
    },
    /// Material definitions were reloaded
    Reloaded {
        /// Number of definitions now loaded
        count: usize,
    },
    /// Reloading failed; the previous definitions are still loaded
    ReloadFailed {
        /// Failure description
        reason: String,
    },
}

/// Map a possibly out-of-range selection back into `0..count`
///
/// Below zero wraps to the last entry, past the end wraps to the first. An
/// empty list always yields zero.
pub fn wrap_selection(index: isize, count: usize) -> usize {
    if count == 0 || index >= count as isize {
        0
    } else if index < 0 {
        count - 1
    } else {
        index as usize
    }
}

/// A boundary polygon and the mesh built from it
#[derive(Debug, Clone)]
pub struct PreviewShape {
    polygon: BoundaryPolygon,
    mesh: PolygonMesh,
}

impl PreviewShape {
    /// Mesh `polygon`
    pub fn new(polygon: BoundaryPolygon) -> Result<Self, SessionError> {
        let mesh = polygon.mesh().map_err(|source| SessionError::Mesh {
            shape: polygon.name().to_string(),
            source,
        })?;
        Ok(Self { polygon, mesh })
    }

    /// Shape outline
    pub const fn polygon(&self) -> &BoundaryPolygon {
        &self.polygon
    }

    /// Triangulated shape
    pub const fn mesh(&self) -> &PolygonMesh {
        &self.mesh
    }
}

/// Interactive material preview state
pub struct PreviewSession<S: MaterialSource, R: MaterialRenderer> {
    shapes: Vec<PreviewShape>,
    active_shape: usize,
    materials: S,
    renderer: R,
    render_settings: RenderSettings,
    layout: MenuLayout,
    selected: usize,
    menu_open: bool,
    keyboard: KeyboardTracker,
    texture: Option<MaterialTexture>,
    texture_generation: u64,
}

impl<S: MaterialSource, R: MaterialRenderer> PreviewSession<S, R> {
    /// Create a session, meshing every shape up front
    ///
    /// # Arguments
    /// * `shapes` - Preview shapes in toggle order; the first one starts active
    /// * `materials` - Material definitions shown in the menu
    /// * `renderer` - Produces textures for the selected material
    /// * `render_settings` - Scale and quality flag forwarded to the renderer
    /// * `layout` - Overlay positions
    pub fn new(
        shapes: Vec<BoundaryPolygon>,
        materials: S,
        renderer: R,
        render_settings: RenderSettings,
        layout: MenuLayout,
    ) -> Result<Self, SessionError> {
        if shapes.is_empty() {
            return Err(SessionError::NoShapes);
        }

        let shapes = shapes
            .into_iter()
            .map(PreviewShape::new)
            .collect::<Result<Vec<_>, _>>()?;

        for shape in &shapes {
            log::info!(
                "Meshed '{}': {} points -> {} triangles",
                shape.polygon.name(),
                shape.polygon.len(),
                shape.mesh.triangle_count()
            );
        }

        Ok(Self {
            shapes,
            active_shape: 0,
            materials,
            renderer,
            render_settings,
            layout,
            selected: 0,
            menu_open: false,
            keyboard: KeyboardTracker::new(),
            texture: None,
            texture_generation: 0,
        })
    }

    /// Create a session from the shapes, render settings and layout in `config`
    pub fn from_config(config: &PreviewConfig, materials: S, renderer: R) -> Result<Self, SessionError> {
        Self::new(
            config.shapes(),
            materials,
            renderer,
            config.render.clone(),
            config.menu.clone(),
        )
    }

    /// Advance one frame with the keys currently held
    ///
    /// Only keys that went down this frame act. The menu mode is sampled once at
    /// the start of the frame, so toggling the menu does not change how the
    /// other keys of the same frame are interpreted.
    pub fn update(&mut self, held: KeySet) -> Vec<SessionEvent> {
        let pressed = self.keyboard.update(held);
        let menu_open = self.menu_open;

        let mut events = Vec::new();
        for key in pressed.keys() {
            self.handle_key(key, menu_open, &mut events);
        }
        self.selected = wrap_selection(self.selected as isize, self.materials.count());
        events
    }

    fn handle_key(&mut self, key: PreviewKey, menu_open: bool, events: &mut Vec<SessionEvent>) {
        match key {
            PreviewKey::ToggleMenu => {
                self.menu_open = !self.menu_open;
                events.push(SessionEvent::MenuToggled { open: self.menu_open });
            }
            PreviewKey::ToggleShape => {
                let index = self.toggle_shape();
                events.push(SessionEvent::ShapeChanged { index });
                if !self.materials.is_empty() {
                    events.push(self.render_event());
                }
            }
            PreviewKey::SelectUp if menu_open => {
                let index = self.move_selection(-1);
                events.push(SessionEvent::SelectionChanged { index });
            }
            PreviewKey::SelectDown if menu_open => {
                let index = self.move_selection(1);
                events.push(SessionEvent::SelectionChanged { index });
            }
            PreviewKey::Confirm if menu_open => events.push(self.render_event()),
            PreviewKey::Reload if !menu_open => match self.reload_materials() {
                Ok(count) => {
                    events.push(SessionEvent::Reloaded { count });
                    if count > 0 {
                        events.push(self.render_event());
                    }
                }
                Err(e) => events.push(SessionEvent::ReloadFailed { reason: e.to_string() }),
            },
            _ => log::trace!("Ignoring {} (menu open: {})", key, menu_open),
        }
    }

    fn render_event(&mut self) -> SessionEvent {
        match self.render_current().map(|_| ()) {
            Ok(()) => SessionEvent::Rendered {
                uid: self.selected_material().map(|m| m.uid().to_string()).unwrap_or_default(),
            },
            Err(e) => SessionEvent::RenderFailed { reason: e.to_string() },
        }
    }

    /// Move the selection by `delta` entries with wraparound, returning the new index
    pub fn move_selection(&mut self, delta: isize) -> usize {
        self.selected = wrap_selection(self.selected as isize + delta, self.materials.count());
        self.selected
    }

    /// Make the next shape active, returning its index
    ///
    /// The current texture is kept until a new render succeeds.
    pub fn toggle_shape(&mut self) -> usize {
        self.active_shape = (self.active_shape + 1) % self.shapes.len();
        log::info!("Active shape: {}", self.active_shape().polygon.name());
        self.active_shape
    }

    /// Render the selected material onto the active shape
    ///
    /// On success the new texture replaces the current one. On failure the
    /// current texture is left untouched.
    pub fn render_current(&mut self) -> Result<&MaterialTexture, SessionError> {
        let material = self.materials.get(self.selected).ok_or(SessionError::NoMaterials)?;
        let shape = &self.shapes[self.active_shape];
        let request = RenderRequest {
            material,
            shape: shape.polygon.points(),
            scale: self.render_settings.scale,
            preview_quality: self.render_settings.preview_quality,
        };

        match self.renderer.render(&request) {
            Ok(texture) => {
                log::info!(
                    "Rendered '{}' on '{}' ({}x{})",
                    material.uid(),
                    shape.polygon.name(),
                    texture.width(),
                    texture.height()
                );
                self.texture_generation += 1;
                Ok(self.texture.insert(texture))
            }
            Err(e) => {
                log::warn!("{}; keeping previous texture", e);
                Err(e.into())
            }
        }
    }

    /// Re-read material definitions, returning the new count
    ///
    /// On failure the previous definitions stay loaded. The selection is
    /// rewrapped against whatever is loaded afterwards.
    pub fn reload_materials(&mut self) -> Result<usize, SessionError> {
        let result = self.materials.reload();
        self.selected = wrap_selection(self.selected as isize, self.materials.count());

        match result {
            Ok(()) => {
                log::info!("Reloaded {} material definitions", self.materials.count());
                Ok(self.materials.count())
            }
            Err(e) => {
                log::warn!("Material reload failed, keeping previous definitions: {}", e);
                Err(e.into())
            }
        }
    }

    /// Draw the current frame
    ///
    /// Clears to black, draws the active shape with the current texture (if
    /// any), then the material menu or the help overlay.
    pub fn draw<D: DisplaySurface + ?Sized>(&self, surface: &mut D) -> Result<(), SessionError> {
        surface.clear(colors::BLACK)?;

        if let Some(texture) = &self.texture {
            surface.draw_mesh(self.active_shape().mesh(), texture)?;
        }

        if self.menu_open {
            menu::draw_menu(surface, &self.layout, &self.materials, self.selected)?;
        } else {
            menu::draw_help(surface, &self.layout, &self.status_line())?;
        }
        Ok(())
    }

    /// One-line summary of the active shape and selected material
    pub fn status_line(&self) -> String {
        let material = self
            .selected_material()
            .map_or("<no materials>", MaterialDefinition::uid);
        format!(
            "Shape: {} | Material: {} ({}/{})",
            self.active_shape().polygon.name(),
            material,
            if self.materials.is_empty() { 0 } else { self.selected + 1 },
            self.materials.count()
        )
    }

    /// All shapes in toggle order
    pub fn shapes(&self) -> &[PreviewShape] {
        &self.shapes
    }

    /// The shape currently drawn
    pub fn active_shape(&self) -> &PreviewShape {
        &self.shapes[self.active_shape]
    }

    /// Index of the shape currently drawn
    pub const fn active_shape_index(&self) -> usize {
        self.active_shape
    }

    /// Index of the selected material
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected material definition
    pub fn selected_material(&self) -> Option<&MaterialDefinition> {
        self.materials.get(self.selected)
    }

    /// Whether the material menu is open (otherwise the help overlay shows)
    pub const fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// The current texture, if anything has rendered yet
    pub const fn texture(&self) -> Option<&MaterialTexture> {
        self.texture.as_ref()
    }

    /// Number of successful renders so far
    pub const fn texture_generation(&self) -> u64 {
        self.texture_generation
    }

    /// Material definitions
    pub const fn materials(&self) -> &S {
        &self.materials
    }

    /// Material renderer
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the material renderer
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
