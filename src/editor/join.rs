//! Stitching still images into an animated GIF or a video

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, Rgba, RgbaImage};
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::capture::sink::{frame_bytes, FfmpegSink, FrameSink, PixelLayout};
use crate::editor::clip::{validate_fps, OutputFormat};
use crate::error::{AppError, AppResult};
use crate::ffmpeg::Ffmpeg;

const GIF_ENCODER_SPEED: i32 = 10;

#[derive(Debug, Clone)]
pub struct JoinRequest {
    pub images: Vec<PathBuf>,
    pub fps: f64,
    pub format: OutputFormat,
    pub output: PathBuf,
}

/// Loads every image up front so a bad path fails before any output exists
pub fn load_images(paths: &[PathBuf]) -> AppResult<Vec<RgbaImage>> {
    paths
        .iter()
        .map(|path| {
            image::open(path)
                .map(|img| img.to_rgba8())
                .map_err(|e| {
                    debug!("Failed to load {}: {}", path.display(), e);
                    AppError::SourceUnavailable { path: path.clone() }
                })
        })
        .collect()
}

/// Centers every image on a canvas as large as the largest width and height
pub fn compose(images: &[RgbaImage], background: Rgba<u8>) -> Vec<RgbaImage> {
    let width = images.iter().map(|i| i.width()).max().unwrap_or(0);
    let height = images.iter().map(|i| i.height()).max().unwrap_or(0);

    images
        .iter()
        .map(|img| {
            if img.dimensions() == (width, height) {
                return img.clone();
            }
            let mut canvas = RgbaImage::from_pixel(width, height, background);
            let x = (width - img.width()) / 2;
            let y = (height - img.height()) / 2;
            image::imageops::overlay(&mut canvas, img, x as i64, y as i64);
            canvas
        })
        .collect()
}

fn frame_delay(fps: f64) -> AppResult<Delay> {
    let fps = validate_fps(fps)?;
    Ok(Delay::from_saturating_duration(Duration::from_secs_f64(
        1.0 / fps,
    )))
}

fn write_gif(frames: Vec<RgbaImage>, fps: f64, output: &Path) -> AppResult<()> {
    let delay = frame_delay(fps)?;
    let file = File::create(output)?;
    let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), GIF_ENCODER_SPEED);
    encoder.set_repeat(Repeat::Infinite)?;

    for canvas in frames {
        encoder.encode_frame(Frame::from_parts(canvas, 0, 0, delay))?;
    }
    Ok(())
}

fn write_video(ffmpeg: &Ffmpeg, frames: Vec<RgbaImage>, fps: f64, output: &Path) -> AppResult<()> {
    frame_delay(fps)?;
    let Some(first) = frames.first() else {
        return Ok(());
    };

    let mut sink = FfmpegSink::create(
        ffmpeg,
        output,
        PixelLayout::Rgba,
        first.width(),
        first.height(),
        fps,
        &[],
    )?;
    for frame in &frames {
        sink.write_frame(&frame_bytes(frame, sink.layout()))?;
    }
    sink.finish()
}

/// Shows each image for `1/fps` seconds, in input order
pub fn create_video_by_images(ffmpeg: &Ffmpeg, request: &JoinRequest) -> AppResult<()> {
    if request.images.is_empty() {
        return Err(AppError::InvalidInput("No images to join".to_string()));
    }

    let images = load_images(&request.images)?;
    info!(
        "Joining {} images into {} at {} fps",
        images.len(),
        request.output.display(),
        request.fps
    );

    match request.format {
        OutputFormat::Gif => {
            let frames = compose(&images, Rgba([0, 0, 0, 0]));
            write_gif(frames, request.fps, &request.output)
        }
        OutputFormat::Video => {
            let frames = compose(&images, Rgba([0, 0, 0, 255]));
            write_video(ffmpeg, frames, request.fps, &request.output)
        }
    }
}
