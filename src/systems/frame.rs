//! Frame timing system
//!
//! Produces the `dt` handed to the scene each redraw. The drift blend uses
//! `dt` directly as its lerp factor, so a long stall (first frame, window
//! drag, breakpoint) would overshoot the target; `dt` is capped to keep it
//! well below one.

use std::time::{Duration, Instant};

/// Largest `dt` handed out, in seconds
pub const MAX_DT: f32 = 0.1;

/// Measures time between frames
pub struct FrameClock {
    last_frame: Instant,
    max_dt: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            max_dt: MAX_DT,
        }
    }

    pub fn with_max_dt(mut self, max_dt: f32) -> Self {
        self.max_dt = max_dt;
        self
    }

    /// Seconds since the previous call, capped at the maximum
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = self.dt_between(self.last_frame, now);
        self.last_frame = now;
        dt
    }

    /// Restart timing, e.g. after the scene was remounted
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
    }

    fn dt_between(&self, earlier: Instant, later: Instant) -> f32 {
        let elapsed = later.saturating_duration_since(earlier);
        Self::cap(elapsed, self.max_dt)
    }

    fn cap(elapsed: Duration, max_dt: f32) -> f32 {
        elapsed.as_secs_f32().min(max_dt)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_time_capped() {
        assert_eq!(FrameClock::cap(Duration::from_secs(3), MAX_DT), MAX_DT);
        assert!((FrameClock::cap(Duration::from_millis(16), MAX_DT) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_custom_cap() {
        let clock = FrameClock::new().with_max_dt(0.05);
        let start = Instant::now();
        let dt = clock.dt_between(start, start + Duration::from_millis(200));
        assert_eq!(dt, 0.05);
    }

    #[test]
    fn test_clock_never_negative() {
        let clock = FrameClock::new();
        let now = Instant::now();
        let dt = clock.dt_between(now + Duration::from_millis(5), now);
        assert_eq!(dt, 0.0);
    }

    #[test]
    fn test_tick_after_pause() {
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(20));
        let dt = clock.tick();
        assert!(dt >= 0.02 && dt <= MAX_DT);
    }
}
