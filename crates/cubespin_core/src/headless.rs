//! In-process engine implementation
//!
//! [`HeadlessEngine`] keeps the entity hierarchy, transforms and materials
//! in memory and records what changed since the last upload. Texture
//! requests are handed to a [`TextureLoader`], which decides when and how
//! they complete.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use bitflags::bitflags;
use cubespin_math::{Quat, Vec3};
use slotmap::SlotMap;

use crate::engine::{EntityKey, FaceMaterial, RenderEngine, ResourceEvent, ResourceId};
use crate::TextureError;

bitflags! {
    /// Which parts of an entity changed since the renderer last looked
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        const NONE = 0;
        /// Position or orientation changed
        const TRANSFORM = 1 << 0;
        /// Material changed
        const MATERIAL = 1 << 1;
        const ALL = Self::TRANSFORM.bits() | Self::MATERIAL.bits();
    }
}

/// One entity as stored by the headless engine
#[derive(Clone, Debug)]
pub struct EngineEntity {
    pub name: String,
    pub parent: Option<EntityKey>,
    pub position: Vec3,
    pub orientation: Quat,
    pub material: Option<FaceMaterial>,
    dirty: DirtyFlags,
}

impl EngineEntity {
    fn new(name: impl Into<String>, parent: Option<EntityKey>) -> Self {
        Self {
            name: name.into(),
            parent,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            material: None,
            dirty: DirtyFlags::ALL,
        }
    }

    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }
}

/// Strategy for completing texture requests
pub trait TextureLoader {
    /// Begin loading `url` under `id`
    fn start(&mut self, id: ResourceId, url: &str);

    /// Collect loads that have finished
    fn poll(&mut self) -> Vec<ResourceEvent>;
}

/// Loader whose requests complete only when told to
///
/// Used for tests and deterministic replays.
#[derive(Debug, Default)]
pub struct ManualLoader {
    pending: Vec<(ResourceId, String)>,
    finished: VecDeque<ResourceEvent>,
}

impl ManualLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests still waiting, oldest first
    pub fn pending(&self) -> &[(ResourceId, String)] {
        &self.pending
    }

    /// Id of the most recent pending request for `url`
    pub fn pending_id(&self, url: &str) -> Option<ResourceId> {
        self.pending.iter().rev().find(|(_, u)| u == url).map(|(id, _)| *id)
    }

    /// Mark a request as loaded; returns false if it was not pending
    pub fn complete(&mut self, id: ResourceId) -> bool {
        let Some(index) = self.pending.iter().position(|(p, _)| *p == id) else {
            return false;
        };
        let (id, url) = self.pending.remove(index);
        self.finished.push_back(ResourceEvent::ready(id, url));
        true
    }

    /// Mark a request as failed; returns false if it was not pending
    pub fn fail(&mut self, id: ResourceId, error: TextureError) -> bool {
        let Some(index) = self.pending.iter().position(|(p, _)| *p == id) else {
            return false;
        };
        self.pending.remove(index);
        self.finished.push_back(ResourceEvent::failed(id, error));
        true
    }

    /// Complete every pending request in request order
    pub fn complete_all(&mut self) {
        for (id, url) in self.pending.drain(..) {
            self.finished.push_back(ResourceEvent::ready(id, url));
        }
    }
}

impl TextureLoader for ManualLoader {
    fn start(&mut self, id: ResourceId, url: &str) {
        self.pending.push((id, url.to_string()));
    }

    fn poll(&mut self) -> Vec<ResourceEvent> {
        self.finished.drain(..).collect()
    }
}

/// Loader that resolves local files on background threads
///
/// Accepts `file://` URLs and bare paths, relative to `root`. Files are
/// only checked for existence; decoding is the renderer's job.
pub struct FileLoader {
    root: PathBuf,
    sender: Sender<ResourceEvent>,
    receiver: Receiver<ResourceEvent>,
}

impl FileLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            root: root.into(),
            sender,
            receiver,
        }
    }

    fn resolve(&self, url: &str) -> Result<PathBuf, TextureError> {
        if let Some(path) = url.strip_prefix("file://") {
            return Ok(PathBuf::from(path));
        }
        if url.contains("://") {
            return Err(TextureError::Unsupported(url.to_string()));
        }
        Ok(self.root.join(url))
    }
}

impl TextureLoader for FileLoader {
    fn start(&mut self, id: ResourceId, url: &str) {
        let path = match self.resolve(url) {
            Ok(path) => path,
            Err(err) => {
                // Reported on the next poll like any other completion
                let _ = self.sender.send(ResourceEvent::failed(id, err));
                return;
            }
        };

        let sender = self.sender.clone();
        let url = url.to_string();
        thread::spawn(move || {
            let event = match std::fs::metadata(&path) {
                Ok(meta) if meta.is_file() => ResourceEvent::ready(id, url),
                Ok(_) => ResourceEvent::failed(id, TextureError::NotFound(url)),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    ResourceEvent::failed(id, TextureError::NotFound(url))
                }
                Err(err) => ResourceEvent::failed(id, TextureError::Io(err)),
            };
            // The receiver is gone once the engine is dropped
            let _ = sender.send(event);
        });
    }

    fn poll(&mut self) -> Vec<ResourceEvent> {
        self.receiver.try_iter().collect()
    }
}

/// Engine that keeps the scene in memory
pub struct HeadlessEngine<L: TextureLoader = ManualLoader> {
    entities: SlotMap<EntityKey, EngineEntity>,
    loader: L,
    next_resource: u64,
}

impl Default for HeadlessEngine<ManualLoader> {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessEngine<ManualLoader> {
    /// Engine with a [`ManualLoader`]
    pub fn new() -> Self {
        Self::with_loader(ManualLoader::new())
    }
}

impl<L: TextureLoader> HeadlessEngine<L> {
    pub fn with_loader(loader: L) -> Self {
        Self {
            entities: SlotMap::with_key(),
            loader,
            next_resource: 1,
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    pub fn entity(&self, key: EntityKey) -> Option<&EngineEntity> {
        self.entities.get(key)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Direct children of `parent`
    pub fn children(&self, parent: EntityKey) -> Vec<EntityKey> {
        self.entities
            .iter()
            .filter(|(_, e)| e.parent == Some(parent))
            .map(|(k, _)| k)
            .collect()
    }

    /// World-space orientation, composing parents down to `key`
    pub fn world_orientation(&self, key: EntityKey) -> Option<Quat> {
        let entity = self.entities.get(key)?;
        let local = entity.orientation;
        match entity.parent.and_then(|p| self.world_orientation(p)) {
            Some(parent) => Some(parent * local),
            None => Some(local),
        }
    }

    pub fn has_dirty_entities(&self) -> bool {
        self.entities.values().any(|e| e.is_dirty())
    }

    /// Entities changed since the last call, with what changed; clears the flags
    pub fn take_dirty(&mut self) -> Vec<(EntityKey, DirtyFlags)> {
        let mut changed = Vec::new();
        for (key, entity) in self.entities.iter_mut() {
            if entity.is_dirty() {
                changed.push((key, entity.dirty));
                entity.dirty = DirtyFlags::NONE;
            }
        }
        changed
    }

    pub fn clear_all_dirty(&mut self) {
        for entity in self.entities.values_mut() {
            entity.dirty = DirtyFlags::NONE;
        }
    }
}

impl<L: TextureLoader> RenderEngine for HeadlessEngine<L> {
    fn create_entity(&mut self, name: &str, parent: Option<EntityKey>) -> EntityKey {
        let parent = parent.filter(|p| self.entities.contains_key(*p));
        self.entities.insert(EngineEntity::new(name, parent))
    }

    fn create_face(&mut self, parent: EntityKey, offset: Vec3, rotation: Vec3) -> EntityKey {
        let key = self.create_entity("face", Some(parent));
        if let Some(face) = self.entities.get_mut(key) {
            face.position = offset;
            face.orientation = Quat::from_euler_degrees(rotation);
        }
        key
    }

    fn contains(&self, entity: EntityKey) -> bool {
        self.entities.contains_key(entity)
    }

    fn set_position(&mut self, entity: EntityKey, position: Vec3) {
        if let Some(e) = self.entities.get_mut(entity) {
            e.position = position;
            e.dirty |= DirtyFlags::TRANSFORM;
        }
    }

    fn set_orientation(&mut self, entity: EntityKey, orientation: Quat) {
        if let Some(e) = self.entities.get_mut(entity) {
            e.orientation = orientation;
            e.dirty |= DirtyFlags::TRANSFORM;
        }
    }

    fn set_material(&mut self, entity: EntityKey, material: &FaceMaterial) {
        if let Some(e) = self.entities.get_mut(entity) {
            e.material = Some(material.clone());
            e.dirty |= DirtyFlags::MATERIAL;
        }
    }

    fn request_texture(&mut self, url: &str) -> ResourceId {
        let id = ResourceId::new(self.next_resource);
        self.next_resource += 1;
        log::debug!("Requesting texture {} as #{}", url, id.raw());
        self.loader.start(id, url);
        id
    }

    fn poll_resources(&mut self) -> Vec<ResourceEvent> {
        self.loader.poll()
    }

    fn destroy_entity(&mut self, entity: EntityKey) {
        for child in self.children(entity) {
            self.destroy_entity(child);
        }
        self.entities.remove(entity);
    }
}
