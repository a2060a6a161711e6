//! Cube scene assembly
//!
//! [`CubeScene`] wires the spin and drift controllers and the cube to
//! engine entities, routes pointer input to them, and runs the per-frame
//! update. It owns its listener registrations and gives them back on
//! teardown.

use cubespin_input::{
    CameraDriftController, DriftSettings, InertialSpinController, ListenerGuard, ListenerKind,
    ListenerRegistry, PointerEvent, PointerPoint, SceneId, SpinSettings, ViewportSize,
};
use cubespin_math::{Quat, Vec3};

use crate::cube::{CubeSettings, HostEnvironment, MultiFaceCube};
use crate::engine::{EntityKey, RenderEngine};
use crate::picking::{camera_ray, pick_face};
use crate::preset::ScenePreset;

/// Tuning for a whole scene
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneSettings {
    pub spin: SpinSettings,
    pub drift: DriftSettings,
    pub cube: CubeSettings,
    /// Vertical field of view used for picking
    pub fov_y_degrees: f32,
    /// Pointer travel (pixels) beyond which a press counts as a drag, not a click
    pub click_slop: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            spin: SpinSettings::default(),
            drift: DriftSettings::default(),
            cube: CubeSettings::default(),
            fov_y_degrees: 45.0,
            click_slop: 4.0,
        }
    }
}

/// Where a press started and whether it has turned into a drag
#[derive(Clone, Copy, Debug)]
struct Press {
    origin: PointerPoint,
    dragged: bool,
}

/// A mounted cube scene
pub struct CubeScene<E: RenderEngine, H: HostEnvironment> {
    id: SceneId,
    engine: E,
    host: H,
    settings: SceneSettings,
    viewport: ViewportSize,
    cube: Option<MultiFaceCube>,
    camera: Option<EntityKey>,
    light: Option<EntityKey>,
    spin: InertialSpinController,
    drift: CameraDriftController,
    press: Option<Press>,
    listeners: Vec<ListenerGuard>,
}

impl<E: RenderEngine, H: HostEnvironment> CubeScene<E, H> {
    /// Build the scene from a preset and start listening for input
    pub fn assemble(
        mut engine: E,
        host: H,
        registry: &ListenerRegistry,
        preset: &ScenePreset,
        settings: SceneSettings,
        viewport: ViewportSize,
    ) -> Self {
        let id = registry.allocate_scene_id();
        let listeners = ListenerKind::ALL
            .iter()
            .map(|&kind| registry.register(id, kind))
            .collect();

        let camera_pos = Vec3::from(preset.camera_position);
        let camera = engine.create_entity("camera", None);
        engine.set_position(camera, camera_pos);

        let light = engine.create_entity("light", None);
        engine.set_orientation(light, Quat::from_euler_degrees(Vec3::new(45.0, 0.0, 0.0)));

        let mut cube = MultiFaceCube::construct(&mut engine, settings.cube);
        cube.set_textures(&mut engine, &preset.textures);
        cube.set_links(&preset.links);
        if let Some(url) = preset.diffuse_map.as_deref() {
            cube.set_diffuse_map(&mut engine, url);
        }

        let mut spin = InertialSpinController::new().with_settings(settings.spin);
        spin.bind(cube.orientation());
        let mut drift = CameraDriftController::new().with_settings(settings.drift);
        drift.bind(camera_pos);

        log::info!(
            "Assembled scene {} from preset '{}' ({} textures, {} links)",
            id.raw(),
            preset.name,
            preset.textures.len(),
            preset.links.len()
        );

        Self {
            id,
            engine,
            host,
            settings,
            viewport,
            cube: Some(cube),
            camera: Some(camera),
            light: Some(light),
            spin,
            drift,
            press: None,
            listeners,
        }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn cube(&self) -> Option<&MultiFaceCube> {
        self.cube.as_ref()
    }

    pub fn camera(&self) -> Option<EntityKey> {
        self.camera
    }

    pub fn spin(&self) -> &InertialSpinController {
        &self.spin
    }

    pub fn drift(&self) -> &CameraDriftController {
        &self.drift
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    /// Turn pointer-following for the camera on or off
    ///
    /// The camera keeps easing toward its last target either way.
    pub fn set_drift_enabled(&mut self, enabled: bool) {
        self.drift.settings.enabled = enabled;
        log::info!("Camera drift {}", if enabled { "enabled" } else { "disabled" });
    }

    pub fn is_mounted(&self) -> bool {
        self.cube.is_some()
    }

    /// Route one pointer event to the controllers
    ///
    /// A drag can only begin on the surface but is followed anywhere until
    /// release. A release that never moved past the click slop is a click
    /// and is tested against the cube faces.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if !self.is_mounted() {
            return;
        }
        match event {
            PointerEvent::Down { point, .. } => {
                if !self.viewport.contains(point) {
                    return;
                }
                self.spin.on_drag_start(point);
                self.press = Some(Press { origin: point, dragged: false });
            }
            PointerEvent::Move { point, .. } => {
                self.drift.on_pointer_move(point, self.viewport);
                self.spin.on_drag_move(point);
                if let Some(press) = self.press.as_mut() {
                    if (point - press.origin).length() > self.settings.click_slop {
                        press.dragged = true;
                    }
                }
            }
            PointerEvent::Up { .. } => {
                self.spin.on_drag_end();
                if let Some(press) = self.press.take() {
                    if !press.dragged {
                        self.click(press.origin);
                    }
                }
            }
        }
    }

    /// Record a new viewport size
    pub fn handle_resize(&mut self, viewport: ViewportSize) {
        self.viewport = viewport;
    }

    fn click(&mut self, point: PointerPoint) {
        let Some(cube) = self.cube.as_mut() else {
            return;
        };
        let camera_pos = self.drift.position().unwrap_or(Vec3::ZERO);
        let ray = camera_ray(point, self.viewport, camera_pos, self.settings.fov_y_degrees);
        if let Some(face) = pick_face(cube.orientation(), ray) {
            log::debug!("Click at ({:.0}, {:.0}) hit face {:?}", point.x, point.y, face);
            cube.on_face_hit(&mut self.engine, &mut self.host, face.index());
        }
    }

    /// Per-frame update
    ///
    /// Applies finished texture loads, advances both controllers and the
    /// face pulses, and writes camera position and cube orientation.
    pub fn tick(&mut self, dt: f32) {
        let events = self.engine.poll_resources();
        match self.cube.as_mut() {
            Some(cube) => {
                for event in events {
                    cube.on_resource_event(&mut self.engine, event);
                }
            }
            None => {
                if !events.is_empty() {
                    log::debug!("Dropping {} texture events for unmounted scene {}", events.len(), self.id.raw());
                }
                return;
            }
        }

        self.spin.tick(dt);
        if let (Some(camera), Some(pos)) = (self.camera, self.drift.tick(dt)) {
            self.engine.set_position(camera, pos);
        }
        if let (Some(cube), Some(orientation)) = (self.cube.as_mut(), self.spin.orientation()) {
            cube.set_orientation(&mut self.engine, orientation);
            cube.tick(&mut self.engine, dt);
        }
    }

    /// Remove every listener and destroy the scene's entities
    ///
    /// Safe to call more than once.
    pub fn teardown(&mut self) {
        for guard in &mut self.listeners {
            guard.release();
        }
        self.listeners.clear();

        if let Some(cube) = self.cube.take() {
            cube.teardown(&mut self.engine);
            log::info!("Tore down scene {}", self.id.raw());
        }
        for entity in [self.camera.take(), self.light.take()].into_iter().flatten() {
            self.engine.destroy_entity(entity);
        }
        self.spin.unbind();
        self.drift.unbind();
        self.press = None;
    }
}

impl<E: RenderEngine, H: HostEnvironment> Drop for CubeScene<E, H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
