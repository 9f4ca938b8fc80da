//! Mouse-driven region selection
//!
//! Raw press/release tracking, normalization into a [`Region`], and the
//! bounded confirm-and-retry loop.
//!
//! [`Region`]: crate::app::Region

pub mod region;
pub mod tracker;
pub mod verify;

pub use tracker::{MouseHook, MouseTracker};
pub use verify::{select_region_and_verify, SelectionUi};
