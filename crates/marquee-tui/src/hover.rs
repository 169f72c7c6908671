//! Hover state
//!
//! Terminals report mouse positions, not enter/leave. The tracker remembers
//! whether the pointer was inside the marquee box and reports a transition
//! only when that changes.

use ratatui::layout::{Position, Rect};

/// Pointer crossing the marquee box boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Enter,
    Leave,
}

#[derive(Debug, Default)]
pub struct HoverTracker {
    inside: bool,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Feed a mouse position (screen coords) against the current box
    pub fn update(&mut self, column: u16, row: u16, area: Rect) -> Option<PointerEvent> {
        let inside = area.contains(Position::new(column, row));
        self.transition(inside)
    }

    /// The pointer left the terminal or the box disappeared
    pub fn clear(&mut self) -> Option<PointerEvent> {
        self.transition(false)
    }

    fn transition(&mut self, inside: bool) -> Option<PointerEvent> {
        if inside == self.inside {
            return None;
        }
        self.inside = inside;
        Some(if inside {
            PointerEvent::Enter
        } else {
            PointerEvent::Leave
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_event_per_crossing() {
        let area = Rect::new(10, 5, 20, 3);
        let mut tracker = HoverTracker::new();

        assert_eq!(tracker.update(0, 0, area), None);
        assert_eq!(tracker.update(10, 5, area), Some(PointerEvent::Enter));
        assert_eq!(tracker.update(15, 6, area), None);
        assert_eq!(tracker.update(29, 7, area), None);
        assert_eq!(tracker.update(30, 7, area), Some(PointerEvent::Leave));
        assert_eq!(tracker.update(31, 7, area), None);
    }

    #[test]
    fn test_clear() {
        let area = Rect::new(0, 0, 5, 1);
        let mut tracker = HoverTracker::new();
        assert_eq!(tracker.clear(), None);

        tracker.update(1, 0, area);
        assert!(tracker.is_inside());
        assert_eq!(tracker.clear(), Some(PointerEvent::Leave));
        assert!(!tracker.is_inside());
    }
}
