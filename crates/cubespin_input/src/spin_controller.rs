//! Inertial spin controller
//!
//! Dragging spins the bound orientation directly from live pointer deltas.
//! After release the last drag velocity keeps spinning it, decaying by a
//! constant factor every tick until each axis drops to the threshold and is
//! snapped to zero.
//!
//! Velocity is in degrees per tick: `velocity.x` turns about [`WORLD_UP`],
//! `velocity.y` about [`WORLD_RIGHT`].

use cubespin_math::{Quat, Vec2, Vec3};
use crate::PointerPoint;

/// World axis for horizontal drags
pub const WORLD_UP: Vec3 = Vec3::Y;
/// World axis for vertical drags
pub const WORLD_RIGHT: Vec3 = Vec3::X;

/// Tuning for the spin controller
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinSettings {
    /// Degrees of spin per pixel of drag
    pub rotation_speed: f32,
    /// Per-tick velocity multiplier after release
    pub drag: f32,
    /// Velocity at or below which an axis is snapped to zero
    pub min_delta: f32,
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            rotation_speed: 0.25,
            drag: 0.95,
            min_delta: 0.001,
        }
    }
}

/// Mutable drag state owned by one controller
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpinState {
    pub velocity: Vec2,
    pub last_point: PointerPoint,
    pub is_dragging: bool,
}

/// Converts drags into damped spin of a bound orientation
#[derive(Clone, Debug, Default)]
pub struct InertialSpinController {
    state: SpinState,
    /// Bound target orientation; `None` until a target exists
    orientation: Option<Quat>,
    pub settings: SpinSettings,
}

impl InertialSpinController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: replace all settings
    pub fn with_settings(mut self, settings: SpinSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builder: set rotation speed (degrees per pixel)
    pub fn with_rotation_speed(mut self, speed: f32) -> Self {
        self.settings.rotation_speed = speed;
        self
    }

    /// Builder: set the per-tick drag factor
    pub fn with_drag(mut self, drag: f32) -> Self {
        self.settings.drag = drag;
        self
    }

    /// Builder: set the zero-snap threshold
    pub fn with_min_delta(mut self, min_delta: f32) -> Self {
        self.settings.min_delta = min_delta;
        self
    }

    /// Bind the controller to a target starting at `orientation`
    pub fn bind(&mut self, orientation: Quat) {
        self.orientation = Some(orientation);
    }

    /// Drop the target and reset drag state
    pub fn unbind(&mut self) {
        self.orientation = None;
        self.state = SpinState::default();
    }

    pub fn is_bound(&self) -> bool {
        self.orientation.is_some()
    }

    /// Current orientation of the bound target
    pub fn orientation(&self) -> Option<Quat> {
        self.orientation
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn velocity(&self) -> Vec2 {
        self.state.velocity
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    /// Begin a drag session, or rebase the one already running
    pub fn on_drag_start(&mut self, point: PointerPoint) {
        if !self.is_bound() {
            return;
        }
        self.state.is_dragging = true;
        self.state.last_point = point;
    }

    /// Spin by the delta since the last point
    pub fn on_drag_move(&mut self, point: PointerPoint) {
        if !self.is_bound() || !self.state.is_dragging {
            return;
        }
        let delta = point - self.state.last_point;
        self.state.velocity = delta * self.settings.rotation_speed;
        self.state.last_point = point;
        self.rotate();
    }

    /// End the drag session; the last velocity carries on and decays
    pub fn on_drag_end(&mut self) {
        if !self.is_bound() {
            return;
        }
        self.state.is_dragging = false;
    }

    /// Per-frame update
    ///
    /// Decay is per call, not scaled by `dt`.
    pub fn tick(&mut self, _dt: f32) {
        if !self.is_bound() || self.state.is_dragging {
            return;
        }

        let SpinSettings { drag, min_delta, .. } = self.settings;
        let v = &mut self.state.velocity;
        v.x = decay_axis(v.x, drag, min_delta);
        v.y = decay_axis(v.y, drag, min_delta);

        if !self.state.velocity.is_zero() {
            self.rotate();
        }
    }

    /// Left-multiply the current velocity's rotation onto the orientation
    fn rotate(&mut self) {
        let Some(orientation) = self.orientation else {
            return;
        };
        let v = self.state.velocity;
        let increment = Quat::from_axis_angle_degrees(WORLD_UP, v.x)
            * Quat::from_axis_angle_degrees(WORLD_RIGHT, v.y);
        self.orientation = Some((increment * orientation).normalize());
    }
}

/// One decay step for a single velocity axis
#[inline]
fn decay_axis(v: f32, drag: f32, min_delta: f32) -> f32 {
    if v.abs() > min_delta {
        v * drag
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bound() -> InertialSpinController {
        let mut c = InertialSpinController::new();
        c.bind(Quat::IDENTITY);
        c
    }

    fn drag(c: &mut InertialSpinController, from: (f32, f32), to: (f32, f32)) {
        c.on_drag_start(PointerPoint::new(from.0, from.1));
        c.on_drag_move(PointerPoint::new(to.0, to.1));
        c.on_drag_end();
    }

    #[test]
    fn test_default_settings() {
        let s = SpinSettings::default();
        assert_eq!(s.rotation_speed, 0.25);
        assert_eq!(s.drag, 0.95);
        assert_eq!(s.min_delta, 0.001);
    }

    #[test]
    fn test_drag_sets_velocity() {
        let mut c = bound();
        c.on_drag_start(PointerPoint::new(100.0, 100.0));
        c.on_drag_move(PointerPoint::new(150.0, 130.0));
        assert_eq!(c.velocity(), Vec2::new(12.5, 7.5));
        assert_eq!(c.state().last_point, PointerPoint::new(150.0, 130.0));
    }

    #[test]
    fn test_drag_rotates_immediately() {
        let mut c = bound();
        c.on_drag_start(PointerPoint::new(0.0, 0.0));
        c.on_drag_move(PointerPoint::new(360.0, 0.0));
        // 90 degrees about world up: +X goes to -Z
        let q = c.orientation().unwrap();
        assert!((q.rotate(Vec3::X) - (-Vec3::Z)).length() < 1e-5);
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut c = bound();
        c.on_drag_move(PointerPoint::new(50.0, 50.0));
        assert_eq!(c.velocity(), Vec2::ZERO);
        assert_eq!(c.orientation(), Some(Quat::IDENTITY));
    }

    #[test]
    fn test_second_start_rebases() {
        let mut c = bound();
        c.on_drag_start(PointerPoint::new(0.0, 0.0));
        c.on_drag_start(PointerPoint::new(100.0, 100.0));
        assert!(c.is_dragging());
        c.on_drag_move(PointerPoint::new(104.0, 100.0));
        assert_eq!(c.velocity(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_no_decay_while_dragging() {
        let mut c = bound();
        c.on_drag_start(PointerPoint::new(0.0, 0.0));
        c.on_drag_move(PointerPoint::new(8.0, 4.0));
        let q = c.orientation();
        c.tick(0.016);
        assert_eq!(c.velocity(), Vec2::new(2.0, 1.0));
        assert_eq!(c.orientation(), q);
    }

    #[test]
    fn test_decay_after_release() {
        let mut c = bound();
        drag(&mut c, (100.0, 100.0), (150.0, 130.0));
        c.tick(0.016);
        assert!((c.velocity().x - 12.5 * 0.95).abs() < 1e-6);
        assert!((c.velocity().y - 7.5 * 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_decay_reaches_zero_in_bounded_steps() {
        let mut c = bound();
        drag(&mut c, (100.0, 100.0), (150.0, 130.0));

        let mut prev = c.velocity().abs();
        let mut steps = 0;
        while !c.velocity().is_zero() {
            c.tick(0.016);
            let cur = c.velocity().abs();
            assert!(cur.x <= prev.x && cur.y <= prev.y);
            prev = cur;
            steps += 1;
            assert!(steps <= 200, "velocity did not settle");
        }
        // ln(0.001 / 12.5) / ln(0.95) is about 184
        assert!(steps >= 180, "settled too early: {}", steps);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut c = bound();
        c.state.velocity = Vec2::new(0.001, -0.001);
        c.tick(0.016);
        assert_eq!(c.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_axes_clamp_independently() {
        let mut c = bound();
        c.state.velocity = Vec2::new(0.0005, 2.0);
        c.tick(0.016);
        assert_eq!(c.velocity().x, 0.0);
        assert!((c.velocity().y - 1.9).abs() < 1e-6);
    }

    #[test]
    fn test_tick_zero_dt_still_decays() {
        let mut c = bound();
        c.state.velocity = Vec2::new(1.0, 0.0);
        c.tick(0.0);
        assert!((c.velocity().x - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_resting_tick_keeps_orientation() {
        let mut c = bound();
        c.tick(0.016);
        assert_eq!(c.orientation(), Some(Quat::IDENTITY));
    }

    #[test]
    fn test_unbound_is_noop() {
        let mut c = InertialSpinController::new();
        c.on_drag_start(PointerPoint::new(0.0, 0.0));
        c.on_drag_move(PointerPoint::new(10.0, 10.0));
        c.on_drag_end();
        c.tick(0.016);
        assert!(!c.is_dragging());
        assert_eq!(c.velocity(), Vec2::ZERO);
        assert_eq!(c.orientation(), None);
    }

    #[test]
    fn test_orientation_stays_unit() {
        let mut c = bound();
        drag(&mut c, (0.0, 0.0), (400.0, -250.0));
        for _ in 0..500 {
            c.tick(0.016);
        }
        let q = c.orientation().unwrap();
        assert!((q.magnitude() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_builders() {
        let c = InertialSpinController::new()
            .with_rotation_speed(0.5)
            .with_drag(0.9)
            .with_min_delta(0.01);
        assert_eq!(c.settings, SpinSettings { rotation_speed: 0.5, drag: 0.9, min_delta: 0.01 });
    }
}
