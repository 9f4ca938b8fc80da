//! Core selection state types
//!
//! Plain data shared by the selection, capture and editing entry points.

use std::fmt;

/// How the recording region is chosen
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureMode {
    /// Drag a rectangle with the mouse and confirm it
    #[default]
    Selection,
    /// Record the entire primary monitor
    FullScreen,
}

/// A point in global screen coordinates (pixels)
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangle of the screen with a top-left origin and a non-zero size
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// Returns `None` if either dimension is zero
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// The whole screen of the given size, anchored at the origin
    pub fn full_screen(width: u32, height: u32) -> Option<Self> {
        Self::new(0, 0, width, height)
    }

    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Raw left-button coordinates recorded during one selection attempt
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseState {
    pub pressed: Option<Point>,
    pub released: Option<Point>,
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both a press and a release were seen
    pub fn is_complete(&self) -> bool {
        self.pressed.is_some() && self.released.is_some()
    }
}
