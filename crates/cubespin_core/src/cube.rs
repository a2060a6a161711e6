//! Multi-face cube
//!
//! A cube built from six engine face planes. Each face owns a material
//! and an optional link target. Textures are bound per face by index and
//! committed only when their load completes; a hit on a linked face opens
//! the link and pulses the face's highlight.

use std::collections::HashMap;
use std::time::Duration;

use cubespin_math::{Quat, Vec3};

use crate::engine::{
    EntityKey, FaceMaterial, MaterialSettings, RenderEngine, ResourceEvent, ResourceId,
};

/// Number of faces on a cube
pub const FACE_COUNT: usize = 6;

/// Face positions, in creation order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceDirection {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl FaceDirection {
    pub const ALL: [FaceDirection; FACE_COUNT] = [
        FaceDirection::PosX,
        FaceDirection::NegX,
        FaceDirection::PosY,
        FaceDirection::NegY,
        FaceDirection::PosZ,
        FaceDirection::NegZ,
    ];

    /// Position in the face sequence
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Outward unit normal in cube space
    pub fn normal(self) -> Vec3 {
        match self {
            FaceDirection::PosX => Vec3::X,
            FaceDirection::NegX => -Vec3::X,
            FaceDirection::PosY => Vec3::Y,
            FaceDirection::NegY => -Vec3::Y,
            FaceDirection::PosZ => Vec3::Z,
            FaceDirection::NegZ => -Vec3::Z,
        }
    }

    /// Centre of the face on the unit cube
    pub fn local_offset(self) -> Vec3 {
        self.normal() * 0.5
    }

    /// Euler degrees turning a +Y-facing plane to face outward
    pub fn local_rotation(self) -> Vec3 {
        match self {
            FaceDirection::PosX => Vec3::new(0.0, 0.0, -90.0),
            FaceDirection::NegX => Vec3::new(0.0, 0.0, 90.0),
            FaceDirection::PosY => Vec3::new(0.0, 0.0, 0.0),
            FaceDirection::NegY => Vec3::new(180.0, 0.0, 0.0),
            FaceDirection::PosZ => Vec3::new(90.0, 0.0, 0.0),
            FaceDirection::NegZ => Vec3::new(-90.0, 0.0, 0.0),
        }
    }
}

/// Side effects the cube asks of the host
pub trait HostEnvironment {
    /// Open `url` in a new browsing context (tab, window, browser)
    fn open_in_new_context(&mut self, url: &str);
}

/// Tuning for the cube
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeSettings {
    pub material: MaterialSettings,
    /// How long a hit face stays highlighted
    ///
    /// Counted down by the `dt` passed to [`MultiFaceCube::tick`], so it is
    /// measured in simulation time. A host that caps `dt` stretches the
    /// pulse in wall-clock time while frames stall.
    pub pulse_duration: Duration,
    pub highlight_color: [f32; 4],
}

impl Default for CubeSettings {
    fn default() -> Self {
        Self {
            material: MaterialSettings::default(),
            pulse_duration: Duration::from_millis(1000),
            highlight_color: [1.0, 1.0, 1.0, 0.35],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Pulse {
    remaining: f32,
    prior: Option<[f32; 4]>,
}

/// One face of the cube
#[derive(Clone, Debug)]
pub struct Face {
    direction: FaceDirection,
    entity: EntityKey,
    link_target: Option<String>,
    material: FaceMaterial,
    /// Latest texture request for this face
    pending_texture: Option<ResourceId>,
    pulse: Option<Pulse>,
}

impl Face {
    fn new<E: RenderEngine>(
        engine: &mut E,
        parent: EntityKey,
        direction: FaceDirection,
        material: FaceMaterial,
    ) -> Self {
        let entity = engine.create_face(parent, direction.local_offset(), direction.local_rotation());
        engine.set_material(entity, &material);
        Self {
            direction,
            entity,
            link_target: None,
            material,
            pending_texture: None,
            pulse: None,
        }
    }

    pub fn direction(&self) -> FaceDirection {
        self.direction
    }

    pub fn local_offset(&self) -> Vec3 {
        self.direction.local_offset()
    }

    pub fn local_rotation(&self) -> Vec3 {
        self.direction.local_rotation()
    }

    /// Engine entity holding this face's material
    pub fn entity(&self) -> EntityKey {
        self.entity
    }

    pub fn link_target(&self) -> Option<&str> {
        self.link_target.as_deref()
    }

    pub fn material(&self) -> &FaceMaterial {
        &self.material
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulse.is_some()
    }

    fn commit<E: RenderEngine>(&self, engine: &mut E) {
        if engine.contains(self.entity) {
            engine.set_material(self.entity, &self.material);
        } else {
            log::debug!("Face {:?} entity is gone; skipping material commit", self.direction);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PendingBinding {
    FaceTexture(usize),
    DiffuseMap,
}

/// Six textured, linkable faces under one root entity
pub struct MultiFaceCube {
    root: EntityKey,
    faces: [Face; FACE_COUNT],
    orientation: Quat,
    settings: CubeSettings,
    pending: HashMap<ResourceId, PendingBinding>,
    pending_diffuse: Option<ResourceId>,
}

impl MultiFaceCube {
    /// Create the root entity and the six faces
    pub fn construct<E: RenderEngine>(engine: &mut E, settings: CubeSettings) -> Self {
        let root = engine.create_entity("cube", None);
        let material = FaceMaterial::from_settings(&settings.material);
        let faces = FaceDirection::ALL.map(|dir| Face::new(engine, root, dir, material.clone()));
        log::info!("Constructed cube with {} faces", FACE_COUNT);

        Self {
            root,
            faces,
            orientation: Quat::IDENTITY,
            settings,
            pending: HashMap::new(),
            pending_diffuse: None,
        }
    }

    pub fn root(&self) -> EntityKey {
        self.root
    }

    pub fn faces(&self) -> &[Face; FACE_COUNT] {
        &self.faces
    }

    pub fn face(&self, index: usize) -> Option<&Face> {
        self.faces.get(index)
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn settings(&self) -> &CubeSettings {
        &self.settings
    }

    /// Number of texture loads still awaited
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Store the orientation and write it to the root entity
    pub fn set_orientation<E: RenderEngine>(&mut self, engine: &mut E, orientation: Quat) {
        self.orientation = orientation;
        engine.set_orientation(self.root, orientation);
    }

    /// Request one texture per face, by index
    ///
    /// Entries past the sixth are dropped and empty entries are skipped.
    /// Faces beyond the list keep their current texture. Returns how many
    /// faces got a request.
    pub fn set_textures<E: RenderEngine, S: AsRef<str>>(&mut self, engine: &mut E, urls: &[S]) -> usize {
        let mut bound = 0;
        for (index, url) in urls.iter().take(FACE_COUNT).enumerate() {
            let url = url.as_ref();
            if url.is_empty() {
                continue;
            }
            let id = engine.request_texture(url);
            // A newer request supersedes whatever this face was waiting for
            if let Some(old) = self.faces[index].pending_texture.replace(id) {
                self.pending.remove(&old);
            }
            self.pending.insert(id, PendingBinding::FaceTexture(index));
            bound += 1;
        }
        if urls.len() > FACE_COUNT {
            log::debug!("Dropped {} texture URLs past face {}", urls.len() - FACE_COUNT, FACE_COUNT);
        }
        bound
    }

    /// Bind one link target per face, by index
    ///
    /// Same truncation rules as [`set_textures`](Self::set_textures).
    pub fn set_links<S: AsRef<str>>(&mut self, urls: &[S]) -> usize {
        let mut bound = 0;
        for (face, url) in self.faces.iter_mut().zip(urls) {
            let url = url.as_ref();
            if url.is_empty() {
                continue;
            }
            face.link_target = Some(url.to_string());
            bound += 1;
        }
        bound
    }

    /// Request a diffuse texture applied to every face once loaded
    pub fn set_diffuse_map<E: RenderEngine>(&mut self, engine: &mut E, url: &str) {
        let id = engine.request_texture(url);
        if let Some(old) = self.pending_diffuse.replace(id) {
            self.pending.remove(&old);
        }
        self.pending.insert(id, PendingBinding::DiffuseMap);
    }

    /// Apply a finished texture load
    ///
    /// Returns true if a material changed. Unknown or superseded requests
    /// and failures leave every face as it was.
    pub fn on_resource_event<E: RenderEngine>(&mut self, engine: &mut E, event: ResourceEvent) -> bool {
        let Some(binding) = self.pending.remove(&event.id) else {
            log::debug!("Ignoring texture #{} with no pending binding", event.id.raw());
            return false;
        };

        match binding {
            PendingBinding::FaceTexture(index) => self.faces[index].pending_texture = None,
            PendingBinding::DiffuseMap => self.pending_diffuse = None,
        }

        let texture = match event.result {
            Ok(texture) => texture,
            Err(err) => {
                log::warn!("Texture #{} failed to load: {}", event.id.raw(), err);
                return false;
            }
        };

        match binding {
            PendingBinding::FaceTexture(index) => {
                let face = &mut self.faces[index];
                if !engine.contains(face.entity) {
                    log::debug!("Face {} was torn down before its texture arrived", index);
                    return false;
                }
                face.material.face_texture = Some(texture);
                face.material.wrap_mode = self.settings.material.wrap_mode;
                face.material.shininess = self.settings.material.shininess;
                face.material.metalness = self.settings.material.metalness;
                face.commit(engine);
            }
            PendingBinding::DiffuseMap => {
                for face in &mut self.faces {
                    face.material.diffuse_map = Some(texture.clone());
                    face.commit(engine);
                }
            }
        }
        true
    }

    /// Handle a hit on face `index`
    ///
    /// Opens the bound link and starts the highlight pulse. Returns false,
    /// doing nothing, when the face has no link or does not exist.
    pub fn on_face_hit<E: RenderEngine, H: HostEnvironment + ?Sized>(
        &mut self,
        engine: &mut E,
        host: &mut H,
        index: usize,
    ) -> bool {
        let duration = self.settings.pulse_duration.as_secs_f32();
        let color = self.settings.highlight_color;
        let Some(face) = self.faces.get_mut(index) else {
            return false;
        };
        let Some(url) = face.link_target.as_deref() else {
            return false;
        };

        log::info!("Opening link for face {}: {}", index, url);
        host.open_in_new_context(url);

        // Restarting a running pulse keeps the original prior state
        let prior = match face.pulse {
            Some(pulse) => pulse.prior,
            None => face.material.highlight,
        };
        face.pulse = Some(Pulse { remaining: duration, prior });
        face.material.highlight = Some(color);
        face.commit(engine);
        true
    }

    /// Advance pulse timers, reverting faces whose pulse has run out
    pub fn tick<E: RenderEngine>(&mut self, engine: &mut E, dt: f32) {
        for face in &mut self.faces {
            let Some(pulse) = face.pulse.as_mut() else {
                continue;
            };
            pulse.remaining -= dt;
            if pulse.remaining <= 0.0 {
                face.material.highlight = pulse.prior;
                face.pulse = None;
                face.commit(engine);
            }
        }
    }

    /// Destroy the cube's entities
    ///
    /// Loads still in flight will find no cube and be dropped.
    pub fn teardown<E: RenderEngine>(self, engine: &mut E) {
        if !self.pending.is_empty() {
            log::debug!("Tearing down cube with {} texture loads in flight", self.pending.len());
        }
        engine.destroy_entity(self.root);
    }
}
