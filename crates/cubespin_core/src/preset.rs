//! Scene presets
//!
//! The asset lists for a scene (face textures, face links, shared diffuse
//! map) and the starting camera position, stored as RON.

use serde::{Serialize, Deserialize};
use std::fs;
use std::io;
use std::path::Path;

/// Asset and camera data for one cube scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePreset {
    /// Preset name (for display/debugging)
    pub name: String,
    /// Face texture URLs, face order +X, -X, +Y, -Y, +Z, -Z
    #[serde(default)]
    pub textures: Vec<String>,
    /// Face link targets, same order as `textures`
    #[serde(default)]
    pub links: Vec<String>,
    /// Diffuse texture shared by every face
    #[serde(default)]
    pub diffuse_map: Option<String>,
    /// Starting camera position [x, y, z]
    #[serde(default = "default_camera_position")]
    pub camera_position: [f32; 3],
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 0.0, 3.0]
}

impl Default for ScenePreset {
    fn default() -> Self {
        Self::new("default")
    }
}

impl ScenePreset {
    /// Create an empty preset
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            textures: Vec::new(),
            links: Vec::new(),
            diffuse_map: None,
            camera_position: default_camera_position(),
        }
    }

    /// Load a preset from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Parse a preset from RON text
    pub fn from_ron(contents: &str) -> Result<Self, SceneError> {
        Ok(ron::from_str(contents)?)
    }

    /// Save a preset to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn with_textures<S: Into<String>>(mut self, urls: impl IntoIterator<Item = S>) -> Self {
        self.textures = urls.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_links<S: Into<String>>(mut self, urls: impl IntoIterator<Item = S>) -> Self {
        self.links = urls.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_diffuse_map(mut self, url: impl Into<String>) -> Self {
        self.diffuse_map = Some(url.into());
        self
    }

    pub fn with_camera_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.camera_position = [x, y, z];
        self
    }
}

/// Error loading or saving a preset
#[derive(Debug)]
pub enum SceneError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneError {
    fn from(e: io::Error) -> Self {
        SceneError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneError::Parse(e)
    }
}

impl From<ron::Error> for SceneError {
    fn from(e: ron::Error) -> Self {
        SceneError::Serialize(e)
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::Io(e) => write!(f, "IO error: {}", e),
            SceneError::Parse(e) => write!(f, "Parse error: {}", e),
            SceneError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Io(e) => Some(e),
            SceneError::Parse(e) => Some(e),
            SceneError::Serialize(e) => Some(e),
        }
    }
}
