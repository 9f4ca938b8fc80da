use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::capture::VideoFormat;
use crate::editor::{ClipSpec, CropRect, OutputFormat};

#[derive(Debug, Parser)]
#[command(version, about = "Record a screen region, then trim, crop or join the results")]
pub struct Cli {
    /// Path to the ffmpeg binary used for encoding
    #[arg(long, global = true, env = "SCREEN_RECORDER_FFMPEG", default_value_os_t = PathBuf::from("ffmpeg"))]
    pub ffmpeg: PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Select a region with the mouse and record it
    Record(RecordArgs),
    /// Trim, crop or convert an existing video
    Edit(EditArgs),
    /// Join still images into a GIF or video
    Join(JoinArgs),
}

#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Container and codec of the recording
    #[arg(long, value_enum, default_value_t = VideoFormatArg::Mp4)]
    pub format: VideoFormatArg,
    /// Output file (defaults to Recording.<format>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Nominal frame rate written to the file
    #[arg(long, default_value_t = 20.0)]
    pub fps: f64,
    /// Show a live preview; press q or Escape in it to stop
    #[arg(short, long)]
    pub display: bool,
    /// Record the whole primary monitor without selecting a region
    #[arg(long)]
    pub full_screen: bool,
    /// Stop after this many seconds
    #[arg(long)]
    pub duration: Option<f64>,
}

impl RecordArgs {
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "Recording.{}",
                VideoFormat::from(self.format).extension()
            ))
        })
    }
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Video to process
    #[arg()]
    pub source: PathBuf,
    /// Interval to keep as START-END (e.g. 0:24-0:32); repeat to concatenate
    #[arg(long = "clip")]
    pub clips: Vec<ClipSpec>,
    /// Crop rectangle as x1,y1,x2,y2 in source pixels
    #[arg(long)]
    pub crop: Option<CropRect>,
    /// gif or a video container; inferred from the output name if omitted
    #[arg(long)]
    pub format: Option<OutputFormat>,
    /// Output file
    #[arg(short, long, default_value_os_t = PathBuf::from("clipped.mp4"))]
    pub output: PathBuf,
    /// Output frame rate
    #[arg(long, default_value_t = 1.0)]
    pub fps: f64,
}

#[derive(Debug, Args)]
pub struct JoinArgs {
    /// Images in display order
    #[arg(required = true)]
    pub images: Vec<PathBuf>,
    /// Images shown per second
    #[arg(long, default_value_t = 5.0)]
    pub fps: f64,
    /// gif or a video container; inferred from the output name if omitted
    #[arg(long)]
    pub format: Option<OutputFormat>,
    /// Output file
    #[arg(short, long, default_value_os_t = PathBuf::from("joint_images.gif"))]
    pub output: PathBuf,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum VideoFormatArg {
    Avi,
    Mp4,
}

impl From<VideoFormatArg> for VideoFormat {
    fn from(f: VideoFormatArg) -> Self {
        match f {
            VideoFormatArg::Avi => Self::Avi,
            VideoFormatArg::Mp4 => Self::Mp4,
        }
    }
}
