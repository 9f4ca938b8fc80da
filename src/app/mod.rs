//! Application module
//!
//! This module contains the shared state types and key bindings.

pub mod config;
mod state;

pub use config::{Action, ShortcutConfig};
pub use state::{CaptureMode, MouseState, Point, Region};
