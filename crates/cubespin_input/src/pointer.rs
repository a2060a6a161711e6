//! Pointer and touch event types
//!
//! Coordinates are surface-local pixels with the origin at the top-left
//! corner and +Y pointing down.

use cubespin_math::Vec2;

/// A pointer position in surface-local pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerPoint {
    pub x: f32,
    pub y: f32,
}

impl PointerPoint {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<PointerPoint> for Vec2 {
    fn from(p: PointerPoint) -> Self {
        Vec2::new(p.x, p.y)
    }
}

impl std::ops::Sub for PointerPoint {
    type Output = Vec2;
    #[inline]
    fn sub(self, other: Self) -> Vec2 {
        Vec2::from(self) - Vec2::from(other)
    }
}

/// Size of the rendering surface in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Smaller of the two dimensions
    #[inline]
    pub fn min_dim(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Centre of the surface
    #[inline]
    pub fn center(&self) -> PointerPoint {
        PointerPoint::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether a surface-local point lies on the surface
    pub fn contains(&self, point: PointerPoint) -> bool {
        point.x >= 0.0 && point.y >= 0.0 && point.x < self.width && point.y < self.height
    }
}

/// Where a pointer event came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// A pointer event after translation from the windowing layer
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Button pressed or first touch contact started
    Down { point: PointerPoint, source: PointerSource },
    /// Pointer moved, pressed or not
    Move { point: PointerPoint, source: PointerSource },
    /// Global release; carries no position
    Up { source: PointerSource },
}

impl PointerEvent {
    pub fn source(&self) -> PointerSource {
        match self {
            PointerEvent::Down { source, .. }
            | PointerEvent::Move { source, .. }
            | PointerEvent::Up { source } => *source,
        }
    }
}

/// Phase of a single touch contact
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// Follows the first active touch contact and ignores every other one
#[derive(Clone, Copy, Debug, Default)]
pub struct TouchTracker {
    active: Option<u64>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the contact currently being followed
    pub fn active_id(&self) -> Option<u64> {
        self.active
    }

    /// Translate one touch update into a pointer event
    ///
    /// Returns `None` for contacts other than the first active one.
    pub fn process(&mut self, id: u64, phase: TouchPhase, point: PointerPoint) -> Option<PointerEvent> {
        let source = PointerSource::Touch;
        match phase {
            TouchPhase::Started => {
                if self.active.is_some() {
                    return None;
                }
                self.active = Some(id);
                Some(PointerEvent::Down { point, source })
            }
            TouchPhase::Moved => {
                (self.active == Some(id)).then_some(PointerEvent::Move { point, source })
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.active != Some(id) {
                    return None;
                }
                self.active = None;
                Some(PointerEvent::Up { source })
            }
        }
    }
}
