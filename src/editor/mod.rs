//! Offline editing of recordings
//!
//! Cropping, trimming and format conversion of finished videos, and joining
//! still images into an animation.

pub mod clip;
pub mod join;
pub mod postprocess;

pub use clip::{ClipSpec, CropRect, OutputFormat};
pub use join::{create_video_by_images, JoinRequest};
pub use postprocess::{trim_and_convert_video, EditRequest};
