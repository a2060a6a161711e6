//! Rendering engine seam
//!
//! The cube and scene talk to the renderer only through [`RenderEngine`].
//! Texture loads are asynchronous: [`RenderEngine::request_texture`] returns
//! a [`ResourceId`] at once and the outcome arrives later as a
//! [`ResourceEvent`] from [`RenderEngine::poll_resources`].

use cubespin_math::{Quat, Vec3};
use serde::{Serialize, Deserialize};
use slotmap::new_key_type;

use crate::TextureError;

new_key_type! {
    /// Generational key to an engine entity
    ///
    /// A key stays invalid after its entity is destroyed, even if the slot
    /// is reused.
    pub struct EntityKey;
}

/// Identifies one texture request
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(u64);

impl ResourceId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// A texture that finished loading
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureHandle {
    pub id: ResourceId,
    pub url: String,
}

/// Completion notice for a texture request
#[derive(Debug)]
pub struct ResourceEvent {
    pub id: ResourceId,
    pub result: Result<TextureHandle, TextureError>,
}

impl ResourceEvent {
    pub fn ready(id: ResourceId, url: impl Into<String>) -> Self {
        Self {
            id,
            result: Ok(TextureHandle { id, url: url.into() }),
        }
    }

    pub fn failed(id: ResourceId, error: TextureError) -> Self {
        Self { id, result: Err(error) }
    }
}

/// How texture coordinates outside [0, 1] are sampled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    #[default]
    ClampToEdge,
    Repeat,
    MirroredRepeat,
}

/// Material parameters shared by every face
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialSettings {
    pub wrap_mode: WrapMode,
    pub shininess: f32,
    pub metalness: f32,
}

impl Default for MaterialSettings {
    fn default() -> Self {
        Self {
            wrap_mode: WrapMode::ClampToEdge,
            shininess: 40.0,
            metalness: 0.0,
        }
    }
}

/// Everything the renderer needs to draw one face
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FaceMaterial {
    /// The face's own texture
    pub face_texture: Option<TextureHandle>,
    /// Diffuse texture shared by all faces
    pub diffuse_map: Option<TextureHandle>,
    pub wrap_mode: WrapMode,
    pub shininess: f32,
    pub metalness: f32,
    /// Background highlight colour while a pulse is running
    pub highlight: Option<[f32; 4]>,
}

impl FaceMaterial {
    pub fn from_settings(settings: &MaterialSettings) -> Self {
        Self {
            wrap_mode: settings.wrap_mode,
            shininess: settings.shininess,
            metalness: settings.metalness,
            ..Self::default()
        }
    }
}

/// The narrow engine interface the cube and scene depend on
///
/// Setters on a destroyed entity must be silent no-ops.
pub trait RenderEngine {
    /// Create an empty entity, optionally parented
    fn create_entity(&mut self, name: &str, parent: Option<EntityKey>) -> EntityKey;

    /// Create a unit plane facing local +Y, placed under `parent`
    ///
    /// `rotation` is in Euler degrees.
    fn create_face(&mut self, parent: EntityKey, offset: Vec3, rotation: Vec3) -> EntityKey;

    /// Whether `entity` still exists
    fn contains(&self, entity: EntityKey) -> bool;

    fn set_position(&mut self, entity: EntityKey, position: Vec3);

    fn set_orientation(&mut self, entity: EntityKey, orientation: Quat);

    fn set_material(&mut self, entity: EntityKey, material: &FaceMaterial);

    /// Start loading a texture; completion is reported by `poll_resources`
    fn request_texture(&mut self, url: &str) -> ResourceId;

    /// Drain texture loads that finished since the last call
    fn poll_resources(&mut self) -> Vec<ResourceEvent>;

    /// Destroy an entity and all of its children
    fn destroy_entity(&mut self, entity: EntityKey);
}
