//! Texture error types
//!
//! Failures reported by texture loads. They travel inside resource
//! notifications and never abort a frame.

use std::fmt;
use std::io;

/// Error type for texture loads
#[derive(Debug)]
pub enum TextureError {
    /// IO error while reading the texture source
    Io(io::Error),
    /// Nothing exists at the requested location
    NotFound(String),
    /// The loader cannot fetch this kind of location
    Unsupported(String),
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Io(err) => write!(f, "Texture IO error: {}", err),
            TextureError::NotFound(url) => write!(f, "Texture not found: {}", url),
            TextureError::Unsupported(url) => write!(f, "Unsupported texture location: {}", url),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Io(err) => Some(err),
            TextureError::NotFound(_) => None,
            TextureError::Unsupported(_) => None,
        }
    }
}

impl From<io::Error> for TextureError {
    fn from(err: io::Error) -> Self {
        TextureError::Io(err)
    }
}
