use nalgebra::Point2;

// A press and release further apart than this (in pixels) is a drag, not a
// click. Drags belong to the camera.
const CLICK_SLOP: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move(Point2<f32>),
    Click(Point2<f32>),
}

/// Turns raw cursor/button events into moves and clicks.
#[derive(Debug)]
pub struct PointerTracker {
    position: Point2<f32>,
    press_position: Option<Point2<f32>>,
}

impl Default for PointerTracker {
    fn default() -> Self {
        PointerTracker::new()
    }
}

impl PointerTracker {
    pub fn new() -> Self {
        PointerTracker {
            position: Point2::origin(),
            press_position: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        match self.press_position {
            Some(p) => (self.position - p).norm() > CLICK_SLOP,
            None => false,
        }
    }

    pub fn cursor_moved(&mut self, x: f32, y: f32) -> PointerEvent {
        self.position = Point2::new(x, y);
        PointerEvent::Move(self.position)
    }

    pub fn button_pressed(&mut self) {
        self.press_position = Some(self.position);
    }

    pub fn button_released(&mut self) -> Option<PointerEvent> {
        let was_drag = self.is_dragging();
        let pressed = self.press_position.take()?;
        if was_drag {
            None
        } else {
            Some(PointerEvent::Click(pressed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click() {
        let mut tracker = PointerTracker::new();
        tracker.cursor_moved(100.0, 200.0);
        tracker.button_pressed();
        tracker.cursor_moved(101.0, 201.0);
        assert!(!tracker.is_dragging());
        assert_eq!(
            tracker.button_released(),
            Some(PointerEvent::Click(Point2::new(100.0, 200.0)))
        );
    }

    #[test]
    fn test_drag_is_not_a_click() {
        let mut tracker = PointerTracker::new();
        tracker.cursor_moved(100.0, 200.0);
        tracker.button_pressed();
        tracker.cursor_moved(160.0, 180.0);
        assert!(tracker.is_dragging());
        assert_eq!(tracker.button_released(), None);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn test_release_without_press() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.button_released(), None);
        assert_eq!(
            tracker.cursor_moved(3.0, 4.0),
            PointerEvent::Move(Point2::new(3.0, 4.0))
        );
    }
}
