//! cubespin - a spinnable cube with a drifting camera
//!
//! Drag to spin the cube, move the pointer to drift the camera, click a
//! face to open its link.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use cubespin::config::{AppConfig, ConfigError};
use cubespin::host::BrowserHost;
use cubespin::input::{InputAction, InputMapper, MappedEvent, PointerMapper};
use cubespin::systems::{FrameClock, TitleStatus, WindowSystem};
use cubespin_core::{CubeScene, FileLoader, HeadlessEngine, ScenePreset, ViewportSize};
use cubespin_input::{ListenerKind, ListenerRegistry};

type Scene = CubeScene<HeadlessEngine<FileLoader>, BrowserHost>;

/// Main application state
struct App {
    config: AppConfig,
    preset: ScenePreset,
    registry: ListenerRegistry,
    window: Option<WindowSystem>,
    scene: Option<Scene>,
    pointer: PointerMapper,
    clock: FrameClock,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let preset = ScenePreset::load(&config.cube.preset).unwrap_or_else(|e| {
            log::warn!(
                "Failed to load preset '{}': {}. Using an empty cube.",
                config.cube.preset.display(),
                e
            );
            ScenePreset::default()
        });

        Self {
            config,
            preset,
            registry: ListenerRegistry::new(),
            window: None,
            scene: None,
            pointer: PointerMapper::new(),
            clock: FrameClock::new(),
        }
    }

    /// Assemble a fresh scene, tearing down any previous one first
    fn mount(&mut self, viewport: ViewportSize) {
        if let Some(mut old) = self.scene.take() {
            old.teardown();
        }
        let engine = HeadlessEngine::with_loader(FileLoader::new(self.config.cube.asset_root.clone()));
        self.scene = Some(CubeScene::assemble(
            engine,
            BrowserHost::new(),
            &self.registry,
            &self.preset,
            self.config.scene_settings(),
            viewport,
        ));
        self.clock.reset();
    }

    /// Whether the mounted scene is listening for `kind`
    fn listening(&self, kind: ListenerKind) -> bool {
        self.scene
            .as_ref()
            .is_some_and(|scene| self.registry.is_registered(scene.id(), kind))
    }

    fn dispatch(&mut self, event: MappedEvent) {
        let kind = match &event {
            MappedEvent::Pointer(pointer) => ListenerKind::for_pointer(pointer),
            MappedEvent::Resize(_) => ListenerKind::Resize,
        };
        if !self.listening(kind) {
            return;
        }
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        match event {
            MappedEvent::Pointer(pointer) => scene.handle_pointer(pointer),
            MappedEvent::Resize(viewport) => scene.handle_resize(viewport),
        }
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::Remount => {
                let viewport = match &self.window {
                    Some(window) => window.viewport(),
                    None => return,
                };
                self.mount(viewport);
                log::info!("Scene remounted");
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::ToggleDrift => {
                if let Some(scene) = self.scene.as_mut() {
                    let enabled = !scene.drift().settings.enabled;
                    scene.set_drift_enabled(enabled);
                }
            }
        }
    }

    fn redraw(&mut self) {
        let dt = self.clock.tick();
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        scene.tick(dt);

        let dirty = scene.engine_mut().take_dirty();
        if !dirty.is_empty() {
            log::trace!("{} entities changed this frame", dirty.len());
        }

        if let Some(window) = &self.window {
            let velocity = scene.spin().velocity();
            let status = TitleStatus {
                velocity: [velocity.x, velocity.y],
                camera: scene.drift().position().map(|p| p.to_array()).unwrap_or_default(),
                drift_enabled: scene.drift().settings.enabled,
                pending: scene.cube().map(|c| c.pending_count()).unwrap_or(0),
            };
            window.update_title(&status);
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => {
                let viewport = window.viewport();
                self.window = Some(window);
                self.mount(viewport);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                return;
            }
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let PhysicalKey::Code(key) = key_event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, key_event.state) {
                        self.handle_action(action, event_loop);
                    }
                }
                return;
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                return;
            }
            _ => {}
        }

        if let Some(mapped) = self.pointer.map_window_event(&event) {
            self.dispatch(mapped);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut scene) = self.scene.take() {
            scene.teardown();
        }
    }
}

fn init_logging(config: &AppConfig) {
    let env = env_logger::Env::default().default_filter_or(config.debug.log_level.as_str());
    env_logger::Builder::from_env(env).init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging is configured from the config, so a load failure is reported after init
    let loaded: Result<AppConfig, ConfigError> = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(&config);
    if let Err(e) = &loaded {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting cubespin");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
