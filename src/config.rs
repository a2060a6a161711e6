//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`CUBESPIN_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use cubespin_core::{CubeSettings, MaterialSettings, SceneSettings, WrapMode};
use cubespin_input::{DriftSettings, SpinSettings};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Spin controller tuning
    #[serde(default)]
    pub spin: SpinConfig,
    /// Camera drift tuning
    #[serde(default)]
    pub drift: DriftConfig,
    /// Cube materials, pulse and assets
    #[serde(default)]
    pub cube: CubeConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`CUBESPIN_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // CUBESPIN_SPIN__DRAG=0.9 -> spin.drag = 0.9
        figment = figment.merge(Env::prefixed("CUBESPIN_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controllers cannot run with
    ///
    /// Spin only comes to rest when `0 <= drag < 1` and `min_delta > 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let spin = &self.spin;
        if !(0.0..1.0).contains(&spin.drag) {
            return Err(ConfigError::invalid(format!(
                "spin.drag must be in [0, 1), got {}",
                spin.drag
            )));
        }
        if !(spin.min_delta > 0.0 && spin.min_delta.is_finite()) {
            return Err(ConfigError::invalid(format!(
                "spin.min_delta must be positive, got {}",
                spin.min_delta
            )));
        }
        if !spin.rotation_speed.is_finite() {
            return Err(ConfigError::invalid(format!(
                "spin.rotation_speed must be finite, got {}",
                spin.rotation_speed
            )));
        }
        Ok(())
    }

    /// Controller, cube and picking settings for a scene
    pub fn scene_settings(&self) -> SceneSettings {
        SceneSettings {
            spin: self.spin.settings(),
            drift: self.drift.settings(),
            cube: self.cube.settings(),
            ..SceneSettings::default()
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "cubespin".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
        }
    }
}

/// Spin controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    /// Degrees of spin per pixel of drag
    pub rotation_speed: f32,
    /// Per-tick velocity multiplier after release
    pub drag: f32,
    /// Velocity below which the spin stops
    pub min_delta: f32,
}

impl Default for SpinConfig {
    fn default() -> Self {
        let defaults = SpinSettings::default();
        Self {
            rotation_speed: defaults.rotation_speed,
            drag: defaults.drag,
            min_delta: defaults.min_delta,
        }
    }
}

impl SpinConfig {
    pub fn settings(&self) -> SpinSettings {
        SpinSettings {
            rotation_speed: self.rotation_speed,
            drag: self.drag,
            min_delta: self.min_delta,
        }
    }
}

/// Camera drift configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Follow the pointer with the camera
    pub enabled: bool,
    /// Camera distance from the cube while drifting
    pub depth: f32,
}

impl Default for DriftConfig {
    fn default() -> Self {
        let defaults = DriftSettings::default();
        Self {
            enabled: defaults.enabled,
            depth: defaults.depth,
        }
    }
}

impl DriftConfig {
    pub fn settings(&self) -> DriftSettings {
        DriftSettings {
            enabled: self.enabled,
            depth: self.depth,
        }
    }
}

/// Cube configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeConfig {
    /// Length of the click highlight in milliseconds
    pub pulse_duration_ms: u64,
    /// Face texture addressing
    pub wrap_mode: WrapMode,
    pub shininess: f32,
    pub metalness: f32,
    /// Scene preset with the texture and link lists
    pub preset: PathBuf,
    /// Directory bare texture paths are resolved against
    pub asset_root: PathBuf,
}

impl Default for CubeConfig {
    fn default() -> Self {
        let material = MaterialSettings::default();
        Self {
            pulse_duration_ms: 1000,
            wrap_mode: material.wrap_mode,
            shininess: material.shininess,
            metalness: material.metalness,
            preset: PathBuf::from("scenes/default.ron"),
            asset_root: PathBuf::from("assets"),
        }
    }
}

impl CubeConfig {
    pub fn settings(&self) -> CubeSettings {
        CubeSettings {
            material: MaterialSettings {
                wrap_mode: self.wrap_mode,
                shininess: self.shininess,
                metalness: self.metalness,
            },
            pulse_duration: Duration::from_millis(self.pulse_duration_ms),
            ..CubeSettings::default()
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn invalid(message: String) -> Self {
        ConfigError { message }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
