//! Scoped event listener registration
//!
//! Scenes register for the event kinds they consume and hold the returned
//! [`ListenerGuard`]s. Dropping or releasing a guard removes the listener,
//! so a torn-down scene leaves nothing behind. Registrations are keyed by
//! scene identity: registering the same kind twice for one scene replaces
//! the earlier registration instead of stacking a duplicate.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::pointer::{PointerEvent, PointerSource};

/// Identity of one mounted scene instance
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SceneId(u64);

impl SceneId {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Event kinds a scene can listen for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerDown,
    PointerMove,
    PointerUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    Resize,
}

impl ListenerKind {
    pub const ALL: [ListenerKind; 7] = [
        ListenerKind::PointerDown,
        ListenerKind::PointerMove,
        ListenerKind::PointerUp,
        ListenerKind::TouchStart,
        ListenerKind::TouchMove,
        ListenerKind::TouchEnd,
        ListenerKind::Resize,
    ];

    /// Kind a scene must listen for to receive `event`
    pub fn for_pointer(event: &PointerEvent) -> ListenerKind {
        match (event, event.source()) {
            (PointerEvent::Down { .. }, PointerSource::Mouse) => ListenerKind::PointerDown,
            (PointerEvent::Move { .. }, PointerSource::Mouse) => ListenerKind::PointerMove,
            (PointerEvent::Up { .. }, PointerSource::Mouse) => ListenerKind::PointerUp,
            (PointerEvent::Down { .. }, PointerSource::Touch) => ListenerKind::TouchStart,
            (PointerEvent::Move { .. }, PointerSource::Touch) => ListenerKind::TouchMove,
            (PointerEvent::Up { .. }, PointerSource::Touch) => ListenerKind::TouchEnd,
        }
    }
}

#[derive(Default)]
struct RegistryInner {
    next_scene: u64,
    next_token: u64,
    /// Live registrations and the token of the guard that owns each
    active: HashMap<(SceneId, ListenerKind), u64>,
}

/// Host-side table of which scenes listen for what
///
/// Cheap to clone; clones share the same table.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a fresh scene identity
    pub fn allocate_scene_id(&self) -> SceneId {
        let mut inner = self.inner.borrow_mut();
        inner.next_scene += 1;
        SceneId(inner.next_scene)
    }

    /// Register `scene` for `kind`
    ///
    /// The listener stays registered until the returned guard is released
    /// or dropped.
    pub fn register(&self, scene: SceneId, kind: ListenerKind) -> ListenerGuard {
        let mut inner = self.inner.borrow_mut();
        inner.next_token += 1;
        let token = inner.next_token;
        if inner.active.insert((scene, kind), token).is_some() {
            log::warn!("Scene {} re-registered {:?}; replacing earlier listener", scene.0, kind);
        }
        ListenerGuard {
            registry: Rc::downgrade(&self.inner),
            scene,
            kind,
            token,
            released: false,
        }
    }

    /// Scenes currently listening for `kind`, in registration-id order
    pub fn subscribers(&self, kind: ListenerKind) -> Vec<SceneId> {
        let inner = self.inner.borrow();
        let mut scenes: Vec<SceneId> = inner
            .active
            .keys()
            .filter(|(_, k)| *k == kind)
            .map(|(scene, _)| *scene)
            .collect();
        scenes.sort();
        scenes
    }

    pub fn is_registered(&self, scene: SceneId, kind: ListenerKind) -> bool {
        self.inner.borrow().active.contains_key(&(scene, kind))
    }

    /// Total live registrations across all scenes
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().active.len()
    }
}

/// Removes its listener when released or dropped
pub struct ListenerGuard {
    registry: Weak<RefCell<RegistryInner>>,
    scene: SceneId,
    kind: ListenerKind,
    token: u64,
    released: bool,
}

impl ListenerGuard {
    pub fn scene(&self) -> SceneId {
        self.scene
    }

    pub fn kind(&self) -> ListenerKind {
        self.kind
    }

    /// Remove the listener; later calls do nothing
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        let Some(inner) = self.registry.upgrade() else {
            return;
        };
        let mut inner = inner.borrow_mut();
        let key = (self.scene, self.kind);
        // A newer registration for the same key belongs to another guard
        if inner.active.get(&key) == Some(&self.token) {
            inner.active.remove(&key);
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("scene", &self.scene)
            .field("kind", &self.kind)
            .field("released", &self.released)
            .finish()
    }
}
