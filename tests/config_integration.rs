//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use cubespin::config::AppConfig;
use cubespin_core::WrapMode;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("CUBESPIN_WINDOW__TITLE", "Test From Env");
    std::env::set_var("CUBESPIN_SPIN__DRAG", "0.8");
    let config = AppConfig::load();
    std::env::remove_var("CUBESPIN_WINDOW__TITLE");
    std::env::remove_var("CUBESPIN_SPIN__DRAG");

    let config = config.unwrap();
    assert_eq!(config.window.title, "Test From Env");
    assert_eq!(config.spin.drag, 0.8);
}

#[test]
#[serial]
fn test_default_file_loading() {
    let config = AppConfig::load().unwrap();
    assert_eq!(config.spin.rotation_speed, 0.25);
    assert_eq!(config.drift.depth, 2.0);
    assert_eq!(config.cube.wrap_mode, WrapMode::ClampToEdge);
    assert_eq!(config.cube.preset.to_str(), Some("scenes/default.ron"));
}

#[test]
#[serial]
fn test_env_wrap_mode() {
    std::env::set_var("CUBESPIN_CUBE__WRAP_MODE", "mirrored_repeat");
    let config = AppConfig::load();
    std::env::remove_var("CUBESPIN_CUBE__WRAP_MODE");

    let settings = config.unwrap().scene_settings();
    assert_eq!(settings.cube.material.wrap_mode, WrapMode::MirroredRepeat);
}

#[test]
#[serial]
fn test_invalid_env_value_is_an_error() {
    std::env::set_var("CUBESPIN_SPIN__DRAG", "sticky");
    let result = AppConfig::load();
    std::env::remove_var("CUBESPIN_SPIN__DRAG");

    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
#[serial]
fn test_missing_config_dir_uses_defaults() {
    let config = AppConfig::load_from("no/such/config/dir").unwrap();
    assert_eq!(config.window.width, 1280);
    assert!(config.drift.enabled);
}

#[test]
#[serial]
fn test_env_drag_that_never_settles_is_rejected() {
    for drag in ["1.0", "1.5"] {
        std::env::set_var("CUBESPIN_SPIN__DRAG", drag);
        let result = AppConfig::load();
        std::env::remove_var("CUBESPIN_SPIN__DRAG");

        let err = result.unwrap_err();
        assert!(err.to_string().contains("spin.drag"), "drag {} accepted", drag);
    }
}

#[test]
#[serial]
fn test_env_zero_min_delta_is_rejected() {
    std::env::set_var("CUBESPIN_SPIN__MIN_DELTA", "0.0");
    let result = AppConfig::load();
    std::env::remove_var("CUBESPIN_SPIN__MIN_DELTA");

    assert!(result.unwrap_err().to_string().contains("spin.min_delta"));
}
