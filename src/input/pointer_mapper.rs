//! Translation from winit window events to pointer events
//!
//! Mouse and touch both end up as [`PointerEvent`]s. winit reports the
//! cursor position separately from button presses, so the mapper remembers
//! the last position to attach it to a press. Only the left button and the
//! first touch contact drive the scene.

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, TouchPhase as WinitTouchPhase, WindowEvent};

use cubespin_input::{PointerEvent, PointerPoint, PointerSource, TouchPhase, TouchTracker, ViewportSize};

/// Something the scene should react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MappedEvent {
    Pointer(PointerEvent),
    Resize(ViewportSize),
}

/// Turns window events into pointer and resize events
#[derive(Debug, Default)]
pub struct PointerMapper {
    cursor: PointerPoint,
    mouse_down: bool,
    touches: TouchTracker,
}

impl PointerMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map any window event, ignoring the ones that carry no pointer data
    pub fn map_window_event(&mut self, event: &WindowEvent) -> Option<MappedEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.map_cursor_moved(*position).map(MappedEvent::Pointer)
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.map_mouse_button(*button, *state).map(MappedEvent::Pointer)
            }
            WindowEvent::Touch(touch) => {
                self.map_touch(touch.id, touch.phase, touch.location).map(MappedEvent::Pointer)
            }
            WindowEvent::Resized(size) => Some(MappedEvent::Resize(Self::map_resize(*size))),
            _ => None,
        }
    }

    pub fn map_cursor_moved(&mut self, position: PhysicalPosition<f64>) -> Option<PointerEvent> {
        self.cursor = to_point(position);
        Some(PointerEvent::Move { point: self.cursor, source: PointerSource::Mouse })
    }

    pub fn map_mouse_button(&mut self, button: MouseButton, state: ElementState) -> Option<PointerEvent> {
        if button != MouseButton::Left {
            return None;
        }
        let source = PointerSource::Mouse;
        match state {
            ElementState::Pressed if !self.mouse_down => {
                self.mouse_down = true;
                Some(PointerEvent::Down { point: self.cursor, source })
            }
            ElementState::Released if self.mouse_down => {
                self.mouse_down = false;
                Some(PointerEvent::Up { source })
            }
            _ => None,
        }
    }

    pub fn map_touch(
        &mut self,
        id: u64,
        phase: WinitTouchPhase,
        location: PhysicalPosition<f64>,
    ) -> Option<PointerEvent> {
        let phase = match phase {
            WinitTouchPhase::Started => TouchPhase::Started,
            WinitTouchPhase::Moved => TouchPhase::Moved,
            WinitTouchPhase::Ended => TouchPhase::Ended,
            WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
        };
        self.touches.process(id, phase, to_point(location))
    }

    pub fn map_resize(size: PhysicalSize<u32>) -> ViewportSize {
        ViewportSize::new(size.width as f32, size.height as f32)
    }
}

fn to_point(position: PhysicalPosition<f64>) -> PointerPoint {
    PointerPoint::new(position.x as f32, position.y as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> PhysicalPosition<f64> {
        PhysicalPosition::new(x, y)
    }

    #[test]
    fn test_press_uses_last_cursor_position() {
        let mut mapper = PointerMapper::new();
        mapper.map_cursor_moved(at(120.0, 80.0));
        let event = mapper.map_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(
            event,
            Some(PointerEvent::Down { point: PointerPoint::new(120.0, 80.0), source: PointerSource::Mouse })
        );
    }

    #[test]
    fn test_cursor_moves_without_button() {
        let mut mapper = PointerMapper::new();
        let event = mapper.map_cursor_moved(at(10.0, 20.0));
        assert!(matches!(event, Some(PointerEvent::Move { .. })));
    }

    #[test]
    fn test_other_buttons_ignored() {
        let mut mapper = PointerMapper::new();
        assert_eq!(mapper.map_mouse_button(MouseButton::Right, ElementState::Pressed), None);
        assert_eq!(mapper.map_mouse_button(MouseButton::Middle, ElementState::Released), None);
    }

    #[test]
    fn test_release_without_press_ignored() {
        let mut mapper = PointerMapper::new();
        assert_eq!(mapper.map_mouse_button(MouseButton::Left, ElementState::Released), None);
        mapper.map_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(
            mapper.map_mouse_button(MouseButton::Left, ElementState::Released),
            Some(PointerEvent::Up { source: PointerSource::Mouse })
        );
    }

    #[test]
    fn test_second_touch_ignored() {
        let mut mapper = PointerMapper::new();
        assert!(mapper.map_touch(1, WinitTouchPhase::Started, at(5.0, 5.0)).is_some());
        assert_eq!(mapper.map_touch(2, WinitTouchPhase::Started, at(50.0, 50.0)), None);
        assert_eq!(mapper.map_touch(2, WinitTouchPhase::Moved, at(60.0, 60.0)), None);
        assert_eq!(
            mapper.map_touch(1, WinitTouchPhase::Ended, at(6.0, 6.0)),
            Some(PointerEvent::Up { source: PointerSource::Touch })
        );
    }

    #[test]
    fn test_resize() {
        let viewport = PointerMapper::map_resize(PhysicalSize::new(640, 480));
        assert_eq!(viewport, ViewportSize::new(640.0, 480.0));
    }
}
