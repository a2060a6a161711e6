//! Camera drift controller
//!
//! The camera eases toward a target derived from the pointer position.
//! Pointer movement always updates the target, pressed or not.
//!
//! Smoothing is a plain per-axis lerp with `dt` as the blend factor. This
//! approximates exponential easing only for small `dt`: at `dt = 1` the
//! camera lands on the target, above that it overshoots, and above 2 it
//! diverges. Callers are expected to cap `dt`.

use cubespin_math::Vec3;
use crate::{PointerPoint, ViewportSize};

/// Tuning for the drift controller
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriftSettings {
    /// When false, pointer movement no longer moves the target
    pub enabled: bool,
    /// Fixed camera distance along +Z
    pub depth: f32,
}

impl Default for DriftSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            depth: 2.0,
        }
    }
}

/// Current and target camera positions
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DriftState {
    pub current_pos: Vec3,
    pub target_pos: Vec3,
}

/// Smooths the camera position toward a pointer-derived target
#[derive(Clone, Debug, Default)]
pub struct CameraDriftController {
    /// `None` until a camera is bound
    state: Option<DriftState>,
    pub settings: DriftSettings,
}

impl CameraDriftController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: replace all settings
    pub fn with_settings(mut self, settings: DriftSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builder: enable or disable drift
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.settings.enabled = enabled;
        self
    }

    /// Builder: set the camera depth
    pub fn with_depth(mut self, depth: f32) -> Self {
        self.settings.depth = depth;
        self
    }

    /// Bind to a camera currently at `position`
    ///
    /// The target starts at the camera position so nothing moves until the
    /// pointer does.
    pub fn bind(&mut self, position: Vec3) {
        self.state = Some(DriftState {
            current_pos: position,
            target_pos: position,
        });
    }

    pub fn unbind(&mut self) {
        self.state = None;
    }

    pub fn is_bound(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&DriftState> {
        self.state.as_ref()
    }

    /// Camera position as of the last tick
    pub fn position(&self) -> Option<Vec3> {
        self.state.map(|s| s.current_pos)
    }

    pub fn target(&self) -> Option<Vec3> {
        self.state.map(|s| s.target_pos)
    }

    /// Retarget from a pointer position
    ///
    /// A degenerate viewport (zero width or height) is ignored.
    pub fn on_pointer_move(&mut self, point: PointerPoint, viewport: ViewportSize) {
        if !self.settings.enabled {
            return;
        }
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let min_dim = viewport.min_dim();
        if min_dim <= 0.0 {
            log::debug!("Ignoring pointer move on {}x{} viewport", viewport.width, viewport.height);
            return;
        }
        state.target_pos = Vec3::new(
            0.5 * (point.x - viewport.width / 2.0) / min_dim,
            0.5 * (point.y - viewport.height / 2.0) / -min_dim,
            self.settings.depth,
        );
    }

    /// Blend toward the target and return the position to write to the camera
    pub fn tick(&mut self, dt: f32) -> Option<Vec3> {
        let state = self.state.as_mut()?;
        state.current_pos = state.current_pos.lerp(state.target_pos, dt);
        Some(state.current_pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: ViewportSize = ViewportSize::new(800.0, 600.0);

    fn bound() -> CameraDriftController {
        let mut c = CameraDriftController::new();
        c.bind(Vec3::new(0.0, 0.0, 3.0));
        c
    }

    #[test]
    fn test_center_maps_to_origin_at_depth() {
        let mut c = bound();
        c.on_pointer_move(PointerPoint::new(400.0, 300.0), VIEWPORT);
        assert_eq!(c.target(), Some(Vec3::new(0.0, 0.0, 2.0)));
    }

    #[test]
    fn test_converges_to_center_target() {
        let mut c = bound();
        c.on_pointer_move(PointerPoint::new(400.0, 300.0), VIEWPORT);
        for _ in 0..2000 {
            c.tick(0.016);
        }
        let pos = c.position().unwrap();
        assert!((pos - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-3);
    }

    #[test]
    fn test_target_mapping_and_y_flip() {
        let mut c = bound();
        // Right edge, top edge
        c.on_pointer_move(PointerPoint::new(800.0, 0.0), VIEWPORT);
        let t = c.target().unwrap();
        assert!((t.x - 0.5 * 400.0 / 600.0).abs() < 1e-6);
        assert!((t.y - 0.25).abs() < 1e-6);
        assert_eq!(t.z, 2.0);
    }

    #[test]
    fn test_tick_zero_keeps_position() {
        let mut c = bound();
        c.on_pointer_move(PointerPoint::new(10.0, 10.0), VIEWPORT);
        let before = c.position();
        assert_eq!(c.tick(0.0), before);
        assert_eq!(c.position(), before);
    }

    #[test]
    fn test_tick_one_lands_on_target() {
        let mut c = bound();
        c.on_pointer_move(PointerPoint::new(123.0, 456.0), VIEWPORT);
        c.tick(1.0);
        assert_eq!(c.position(), c.target());
    }

    #[test]
    fn test_disabled_ignores_pointer() {
        let mut c = bound().with_enabled(false);
        c.on_pointer_move(PointerPoint::new(0.0, 0.0), VIEWPORT);
        assert_eq!(c.target(), Some(Vec3::new(0.0, 0.0, 3.0)));
        // Camera is still written every tick
        assert_eq!(c.tick(0.5), Some(Vec3::new(0.0, 0.0, 3.0)));
    }

    #[test]
    fn test_custom_depth() {
        let mut c = bound().with_depth(5.0);
        c.on_pointer_move(PointerPoint::new(400.0, 300.0), VIEWPORT);
        assert_eq!(c.target().unwrap().z, 5.0);
    }

    #[test]
    fn test_degenerate_viewport_ignored() {
        let mut c = bound();
        c.on_pointer_move(PointerPoint::new(5.0, 5.0), ViewportSize::new(0.0, 600.0));
        assert_eq!(c.target(), Some(Vec3::new(0.0, 0.0, 3.0)));
    }

    #[test]
    fn test_unbound_is_noop() {
        let mut c = CameraDriftController::new();
        c.on_pointer_move(PointerPoint::new(1.0, 1.0), VIEWPORT);
        assert_eq!(c.tick(0.016), None);
        assert_eq!(c.position(), None);
    }
}
