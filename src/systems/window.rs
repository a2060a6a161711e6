//! Window management system
//!
//! Handles window creation, fullscreen toggle, and title updates.

use std::sync::Arc;
use winit::{
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};
use cubespin_input::ViewportSize;
use crate::config::WindowConfig;

/// Manages the application window
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            base_title: config.title.clone(),
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Current drawable size in physical pixels
    pub fn viewport(&self) -> ViewportSize {
        let size = self.window.inner_size();
        ViewportSize::new(size.width as f32, size.height as f32)
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&self) {
        let new_fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(new_fullscreen);
    }

    /// Update window title with spin/drift state
    pub fn update_title(&self, status: &TitleStatus) {
        self.window.set_title(&status.format(&self.base_title));
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// State shown in the window title
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleStatus {
    /// Spin velocity in degrees per tick
    pub velocity: [f32; 2],
    /// Camera position
    pub camera: [f32; 3],
    pub drift_enabled: bool,
    /// Texture loads still in flight
    pub pending: usize,
}

impl TitleStatus {
    pub fn format(&self, base_title: &str) -> String {
        let drift = if self.drift_enabled { "drift on" } else { "drift off" };
        let mut title = format!(
            "{} - spin ({:.2}, {:.2}) cam ({:.2}, {:.2}, {:.2}) [{}]",
            base_title,
            self.velocity[0],
            self.velocity[1],
            self.camera[0],
            self.camera[1],
            self.camera[2],
            drift
        );
        if self.pending > 0 {
            title.push_str(&format!(" loading {}", self.pending));
        }
        title
    }
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> TitleStatus {
        TitleStatus {
            velocity: [12.5, 7.5],
            camera: [0.0, 0.0, 2.0],
            drift_enabled: true,
            pending: 0,
        }
    }

    #[test]
    fn test_title_formatting() {
        let title = status().format("Test");
        assert_eq!(title, "Test - spin (12.50, 7.50) cam (0.00, 0.00, 2.00) [drift on]");
    }

    #[test]
    fn test_title_shows_loading() {
        let title = TitleStatus { pending: 3, drift_enabled: false, ..status() }.format("Test");
        assert!(title.contains("[drift off]"));
        assert!(title.ends_with("loading 3"));
    }

    #[test]
    fn test_error_display() {
        let err = WindowError::CreationFailed("no display".into());
        assert_eq!(err.to_string(), "Window creation failed: no display");
    }
}
