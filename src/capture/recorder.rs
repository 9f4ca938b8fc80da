//! Frame capture loop
//!
//! Grabs a fixed region as fast as capture and encoding allow and appends
//! each frame to a sink. The fps value only labels the output.

use image::RgbaImage;
use log::{info, warn};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::app::{Region, ShortcutConfig};
use crate::capture::screen::ScreenGrabber;
use crate::capture::sink::{frame_bytes, FfmpegSink, FrameSink, PixelLayout, VideoFormat};
use crate::error::AppResult;
use crate::ffmpeg::Ffmpeg;
use crate::ui::preview::GtkRecordingPreview;

pub trait FrameSource {
    fn grab(&mut self, region: Region) -> AppResult<RgbaImage>;
}

/// Live view of the recording; the only interactive stop signal
pub trait RecordingPreview {
    fn show(&mut self, frame: &RgbaImage) -> AppResult<()>;

    /// Polls pending window events; true once a stop key was pressed or the
    /// window was closed
    fn stop_requested(&mut self) -> bool;

    fn close(&mut self);
}

#[derive(Debug, Clone)]
pub struct RecordSettings {
    pub region: Region,
    pub output: PathBuf,
    pub format: VideoFormat,
    pub fps: f64,
    pub display: bool,
    pub max_duration: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordingStats {
    pub frames: u64,
    pub elapsed: Duration,
}

impl RecordingStats {
    pub fn effective_fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.frames as f64 / secs
        } else {
            0.0
        }
    }
}

/// Runs the loop until a stop signal, then always closes the preview and
/// finishes the sink. The first error encountered wins.
pub fn record(
    source: &mut impl FrameSource,
    sink: &mut impl FrameSink,
    mut preview: Option<&mut dyn RecordingPreview>,
    region: Region,
    max_duration: Option<Duration>,
) -> AppResult<RecordingStats> {
    let started = Instant::now();
    let mut frames = 0u64;

    let outcome = capture_frames(
        source,
        sink,
        &mut preview,
        region,
        max_duration,
        started,
        &mut frames,
    );

    if let Some(preview) = preview {
        preview.close();
    }
    let finished = sink.finish();

    outcome?;
    finished?;

    Ok(RecordingStats {
        frames,
        elapsed: started.elapsed(),
    })
}

fn capture_frames(
    source: &mut impl FrameSource,
    sink: &mut impl FrameSink,
    preview: &mut Option<&mut dyn RecordingPreview>,
    region: Region,
    max_duration: Option<Duration>,
    started: Instant,
    frames: &mut u64,
) -> AppResult<()> {
    loop {
        if max_duration.is_some_and(|limit| started.elapsed() >= limit) {
            return Ok(());
        }

        let frame = source.grab(region)?;
        sink.write_frame(&frame_bytes(&frame, sink.layout()))?;
        *frames += 1;

        if let Some(preview) = preview.as_mut() {
            preview.show(&frame)?;
            if preview.stop_requested() {
                return Ok(());
            }
        }
    }
}

/// Records the screen region described by `settings` into a video file
pub fn record_screen(ffmpeg: &Ffmpeg, settings: &RecordSettings) -> AppResult<RecordingStats> {
    let region = settings.region;
    if !settings.display && settings.max_duration.is_none() {
        warn!("No preview and no duration: recording can only be stopped by killing the process");
    }

    let mut grabber = ScreenGrabber::primary()?;
    let mut sink = FfmpegSink::create(
        ffmpeg,
        &settings.output,
        PixelLayout::Bgr24,
        region.width,
        region.height,
        settings.fps,
        &settings.format.encoder_args(),
    )?;

    let mut preview = if settings.display {
        Some(GtkRecordingPreview::new(region, ShortcutConfig::new())?)
    } else {
        None
    };

    info!(
        "Recording {} to {} at {} fps",
        region,
        settings.output.display(),
        settings.fps
    );
    let stats = record(
        &mut grabber,
        &mut sink,
        preview.as_mut().map(|p| p as &mut dyn RecordingPreview),
        region,
        settings.max_duration,
    )?;

    info!(
        "Recorded {} frames in {:.1}s ({:.1} fps effective)",
        stats.frames,
        stats.elapsed.as_secs_f64(),
        stats.effective_fps()
    );
    Ok(stats)
}
