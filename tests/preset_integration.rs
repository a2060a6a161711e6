//! Integration tests for the shipped scene preset
//!
//! The default preset must parse, every texture it names must load from
//! the configured asset root, and clicking a face must open its link.

use std::time::{Duration, Instant};

use cubespin::config::AppConfig;
use cubespin::host::BrowserHost;
use cubespin_core::{
    CubeScene, FaceDirection, FileLoader, HeadlessEngine, PointerEvent, PointerPoint, PointerSource,
    ScenePreset, ViewportSize, FACE_COUNT,
};
use cubespin_input::ListenerRegistry;
use serial_test::serial;

#[test]
#[serial]
fn test_default_preset_parses() {
    let config = AppConfig::load().unwrap();
    let preset = ScenePreset::load(&config.cube.preset).unwrap();
    assert_eq!(preset.textures.len(), FACE_COUNT);
    assert_eq!(preset.links.len(), FACE_COUNT);
    assert!(preset.diffuse_map.is_some());
}

#[test]
#[serial]
fn test_default_preset_textures_load() {
    let config = AppConfig::load().unwrap();
    let preset = ScenePreset::load(&config.cube.preset).unwrap();
    let registry = ListenerRegistry::new();
    let engine = HeadlessEngine::with_loader(FileLoader::new(config.cube.asset_root.clone()));
    let mut scene = CubeScene::assemble(
        engine,
        BrowserHost::with_launcher(|_| Ok(())),
        &registry,
        &preset,
        config.scene_settings(),
        ViewportSize::new(800.0, 600.0),
    );

    let deadline = Instant::now() + Duration::from_secs(5);
    while scene.cube().map(|c| c.pending_count()).unwrap_or(0) > 0 {
        assert!(Instant::now() < deadline, "textures never finished loading");
        scene.tick(0.016);
        std::thread::sleep(Duration::from_millis(5));
    }

    let cube = scene.cube().unwrap();
    for face in cube.faces() {
        assert!(face.material().face_texture.is_some(), "{:?} has no texture", face.direction());
        assert!(face.material().diffuse_map.is_some());
    }
}

#[test]
#[serial]
fn test_click_opens_face_link() {
    let config = AppConfig::load().unwrap();
    let preset = ScenePreset::load(&config.cube.preset).unwrap();
    let registry = ListenerRegistry::new();
    let mut scene = CubeScene::assemble(
        HeadlessEngine::new(),
        BrowserHost::with_launcher(|_| Ok(())),
        &registry,
        &preset,
        config.scene_settings(),
        ViewportSize::new(800.0, 600.0),
    );

    // The viewport centre looks straight at the +Z face
    let point = PointerPoint::new(400.0, 300.0);
    scene.handle_pointer(PointerEvent::Down { point, source: PointerSource::Mouse });
    scene.handle_pointer(PointerEvent::Up { source: PointerSource::Mouse });

    assert_eq!(scene.host().opened_count(), 1);
    assert!(scene.cube().unwrap().face(FaceDirection::PosZ.index()).unwrap().is_pulsing());
}
