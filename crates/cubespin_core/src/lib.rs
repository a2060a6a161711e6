//! Core types for cubespin
//!
//! This crate provides the cube and the scene around it:
//!
//! - [`RenderEngine`] - Narrow interface to the rendering engine
//! - [`HeadlessEngine`] - In-memory engine with pluggable texture loading
//! - [`MultiFaceCube`] - Six textured, linkable faces
//! - [`CubeScene`] - Controllers, cube, camera and listeners wired together
//! - [`ScenePreset`] - RON-backed asset lists for a scene
//! - [`pick_face`] - Ray test from a pointer to a cube face

mod texture_error;
pub mod engine;
pub mod headless;
pub mod cube;
pub mod picking;
mod preset;
mod scene;

pub use texture_error::TextureError;
pub use engine::{
    EntityKey, FaceMaterial, MaterialSettings, RenderEngine, ResourceEvent, ResourceId,
    TextureHandle, WrapMode,
};
pub use headless::{DirtyFlags, EngineEntity, FileLoader, HeadlessEngine, ManualLoader, TextureLoader};
pub use cube::{CubeSettings, Face, FaceDirection, HostEnvironment, MultiFaceCube, FACE_COUNT};
pub use picking::{camera_ray, pick_face, Ray};
pub use preset::{ScenePreset, SceneError};
pub use scene::{CubeScene, SceneSettings};

// Re-export commonly used types for convenience
pub use cubespin_math::{Quat, Vec2, Vec3};
pub use cubespin_input::{PointerEvent, PointerPoint, PointerSource, ViewportSize};
