//! Capture module for screen recording
//!
//! Screen grabs via xcap, the frame capture loop, and the ffmpeg-backed
//! video sink it writes to.

pub mod desktop;
pub mod recorder;
pub mod screen;
pub mod sink;

pub use desktop::DesktopSession;
pub use recorder::{record_screen, RecordSettings};
pub use screen::{capture_primary_monitor, capture_region, screen_size};
pub use sink::VideoFormat;
