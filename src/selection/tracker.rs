//! Left-button press/release tracking
//!
//! The tracker is fed by whatever delivers mouse events (see [`MouseHook`])
//! and decides when a drag is large enough to stop listening.

use log::debug;
use std::ops::ControlFlow;

use crate::app::{MouseState, Point};
use crate::error::AppResult;

/// A release closer than this (in either axis) is treated as a click
pub const MIN_DRAG_DISTANCE: i32 = 5;

/// Whether two points are far enough apart on both axes to count as a drag
pub fn is_drag(from: Point, to: Point) -> bool {
    (to.x - from.x).abs() > MIN_DRAG_DISTANCE && (to.y - from.y).abs() > MIN_DRAG_DISTANCE
}

#[derive(Default, Debug, Clone)]
pub struct MouseTracker {
    state: MouseState,
}

impl MouseTracker {
    pub fn new() -> Self {
        Self {
            state: MouseState::new(),
        }
    }

    pub fn on_press(&mut self, at: Point) {
        debug!("Pressed at ({}, {})", at.x, at.y);
        self.state.pressed = Some(at);
    }

    /// Records the release; `Break` means listening should stop
    pub fn on_release(&mut self, at: Point) -> ControlFlow<()> {
        debug!("Released at ({}, {})", at.x, at.y);
        self.state.released = Some(at);

        match self.state.pressed {
            Some(pressed) if is_drag(pressed, at) => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }

    pub fn state(&self) -> MouseState {
        self.state
    }
}

/// A blocking source of global left-button events.
///
/// `listen` returns once the tracker signals a completed drag or the hook is
/// interrupted; in the latter case the state may be incomplete.
pub trait MouseHook {
    fn listen(&mut self) -> AppResult<MouseState>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_beyond_threshold_stops() {
        let mut tracker = MouseTracker::new();
        tracker.on_press(Point::new(100, 100));
        assert!(tracker.on_release(Point::new(200, 150)).is_break());
        assert!(tracker.state().is_complete());
    }

    #[test]
    fn small_moves_keep_listening() {
        let pairs = [
            (Point::new(0, 0), Point::new(5, 100)),
            (Point::new(0, 0), Point::new(100, 5)),
            (Point::new(50, 50), Point::new(45, 45)),
            (Point::new(50, 50), Point::new(50, 50)),
            (Point::new(10, 10), Point::new(-200, 15)),
        ];
        for (from, to) in pairs {
            let mut tracker = MouseTracker::new();
            tracker.on_press(from);
            assert!(
                tracker.on_release(to).is_continue(),
                "{:?} -> {:?} should be a click",
                from,
                to
            );
        }
    }

    #[test]
    fn threshold_is_exclusive() {
        assert!(!is_drag(Point::new(0, 0), Point::new(5, 5)));
        assert!(is_drag(Point::new(0, 0), Point::new(6, 6)));
        assert!(is_drag(Point::new(6, 6), Point::new(0, 0)));
    }

    #[test]
    fn release_without_press_keeps_listening() {
        let mut tracker = MouseTracker::new();
        assert!(tracker.on_release(Point::new(300, 300)).is_continue());
        assert_eq!(tracker.state().pressed, None);
        assert_eq!(tracker.state().released, Some(Point::new(300, 300)));
    }

    #[test]
    fn later_press_overwrites_earlier() {
        let mut tracker = MouseTracker::new();
        tracker.on_press(Point::new(0, 0));
        assert!(tracker.on_release(Point::new(2, 2)).is_continue());
        tracker.on_press(Point::new(40, 40));
        assert!(tracker.on_release(Point::new(10, 90)).is_break());
        assert_eq!(tracker.state().pressed, Some(Point::new(40, 40)));
        assert_eq!(tracker.state().released, Some(Point::new(10, 90)));
    }
}
