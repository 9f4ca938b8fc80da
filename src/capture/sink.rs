//! Video sinks fed one raw frame at a time

use image::RgbaImage;
use log::{debug, warn};
use std::io::{Read, Write};
use std::path::Path;
use std::process::{Child, ChildStdin};

use crate::error::{AppError, AppResult};
use crate::ffmpeg::{self, stderr_tail, Ffmpeg};

/// Container/codec pair used for screen recordings
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VideoFormat {
    /// XVID-tagged MPEG-4 in AVI
    Avi,
    /// mp4v MPEG-4 in MP4
    #[default]
    Mp4,
}

impl VideoFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            VideoFormat::Avi => "avi",
            VideoFormat::Mp4 => "mp4",
        }
    }

    pub fn encoder_args(&self) -> Vec<String> {
        let tag = match self {
            VideoFormat::Avi => "XVID",
            VideoFormat::Mp4 => "mp4v",
        };
        ["-c:v", "mpeg4", "-vtag", tag, "-q:v", "4"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

/// Byte layout a sink expects for each frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    Bgr24,
    Rgba,
}

impl PixelLayout {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelLayout::Bgr24 => 3,
            PixelLayout::Rgba => 4,
        }
    }

    fn ffmpeg_name(&self) -> &'static str {
        match self {
            PixelLayout::Bgr24 => "bgr24",
            PixelLayout::Rgba => "rgba",
        }
    }
}

/// Reorders captured RGBA pixels into the layout a sink expects
pub fn frame_bytes(frame: &RgbaImage, layout: PixelLayout) -> Vec<u8> {
    match layout {
        PixelLayout::Rgba => frame.as_raw().clone(),
        PixelLayout::Bgr24 => {
            let mut out = Vec::with_capacity(frame.width() as usize * frame.height() as usize * 3);
            for px in frame.pixels() {
                out.extend_from_slice(&[px[2], px[1], px[0]]);
            }
            out
        }
    }
}

pub trait FrameSink {
    fn layout(&self) -> PixelLayout;

    fn write_frame(&mut self, bytes: &[u8]) -> AppResult<()>;

    /// Flushes and closes the output; calling it twice is a no-op
    fn finish(&mut self) -> AppResult<()>;
}

/// Arguments that make ffmpeg read raw frames from stdin
pub fn raw_input_args(
    layout: PixelLayout,
    width: u32,
    height: u32,
    fps: f64,
    encoder_args: &[String],
    output: &Path,
) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "-y".into(),
        "-f".into(),
        "rawvideo".into(),
        "-pix_fmt".into(),
        layout.ffmpeg_name().into(),
        "-s".into(),
        format!("{}x{}", width, height),
        "-r".into(),
        ffmpeg::number(fps),
        "-i".into(),
        "-".into(),
        // yuv420p encoders reject odd dimensions
        "-vf".into(),
        "pad=ceil(iw/2)*2:ceil(ih/2)*2".into(),
        "-pix_fmt".into(),
        "yuv420p".into(),
    ];
    args.extend(encoder_args.iter().cloned());
    args.push(output.to_string_lossy().into_owned());
    args
}

/// Pipes frames into an ffmpeg child process
pub struct FfmpegSink {
    layout: PixelLayout,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    frame_len: usize,
}

impl FfmpegSink {
    pub fn create(
        ffmpeg: &Ffmpeg,
        output: &Path,
        layout: PixelLayout,
        width: u32,
        height: u32,
        fps: f64,
        encoder_args: &[String],
    ) -> AppResult<Self> {
        let args = raw_input_args(layout, width, height, fps, encoder_args, output);
        let mut child = ffmpeg.spawn_piped(&args)?;
        let stdin = child.stdin.take();
        debug!(
            "Started {} for {} ({}x{} @ {} fps)",
            ffmpeg.binary().display(),
            output.display(),
            width,
            height,
            fps
        );

        Ok(Self {
            layout,
            child: Some(child),
            stdin,
            frame_len: width as usize * height as usize * layout.bytes_per_pixel(),
        })
    }

    fn exit_error(child: Child) -> AppError {
        match child.wait_with_output() {
            Ok(output) => AppError::Encode(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                stderr_tail(&output.stderr)
            )),
            Err(e) => AppError::Encode(format!("ffmpeg stopped accepting frames: {}", e)),
        }
    }
}

impl FrameSink for FfmpegSink {
    fn layout(&self) -> PixelLayout {
        self.layout
    }

    fn write_frame(&mut self, bytes: &[u8]) -> AppResult<()> {
        if bytes.len() != self.frame_len {
            return Err(AppError::Encode(format!(
                "Frame is {} bytes, expected {}",
                bytes.len(),
                self.frame_len
            )));
        }

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| AppError::Encode("Sink already finished".to_string()))?;

        if let Err(e) = stdin.write_all(bytes) {
            warn!("ffmpeg pipe closed: {}", e);
            self.stdin = None;
            return match self.child.take() {
                Some(child) => Err(Self::exit_error(child)),
                None => Err(AppError::Io(e)),
            };
        }
        Ok(())
    }

    fn finish(&mut self) -> AppResult<()> {
        // Closing stdin is ffmpeg's end-of-stream
        drop(self.stdin.take());

        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        let status = child.wait()?;
        if status.success() {
            return Ok(());
        }

        let mut stderr = Vec::new();
        if let Some(mut pipe) = child.stderr.take() {
            let _ = pipe.read_to_end(&mut stderr);
        }
        Err(AppError::Encode(format!(
            "ffmpeg exited with {}: {}",
            status,
            stderr_tail(&stderr)
        )))
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if self.child.is_some() {
            if let Err(e) = self.finish() {
                warn!("Video sink closed with error: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::path::PathBuf;

    #[test]
    fn bgr_swaps_red_and_blue() {
        let mut frame = RgbaImage::new(2, 1);
        frame.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        frame.put_pixel(1, 0, Rgba([200, 100, 0, 128]));

        assert_eq!(
            frame_bytes(&frame, PixelLayout::Bgr24),
            vec![30, 20, 10, 0, 100, 200]
        );
        assert_eq!(frame_bytes(&frame, PixelLayout::Rgba).len(), 8);
    }

    #[test]
    fn avi_uses_xvid_tag() {
        let args = VideoFormat::Avi.encoder_args();
        assert!(args.windows(2).any(|w| w == ["-vtag", "XVID"]));
        assert_eq!(VideoFormat::Avi.extension(), "avi");

        let args = VideoFormat::Mp4.encoder_args();
        assert!(args.windows(2).any(|w| w == ["-vtag", "mp4v"]));
    }

    #[test]
    fn raw_input_describes_frames() {
        let output = PathBuf::from("out/Recording.mp4");
        let args = raw_input_args(
            PixelLayout::Bgr24,
            641,
            480,
            20.0,
            &VideoFormat::Mp4.encoder_args(),
            &output,
        );

        assert!(args.windows(2).any(|w| w == ["-pix_fmt", "bgr24"]));
        assert!(args.windows(2).any(|w| w == ["-s", "641x480"]));
        assert!(args.windows(2).any(|w| w == ["-r", "20"]));
        assert!(args.windows(2).any(|w| w == ["-i", "-"]));
        assert_eq!(args.last().map(String::as_str), Some("out/Recording.mp4"));
    }

    #[test]
    fn create_fails_without_ffmpeg() {
        let ffmpeg = Ffmpeg::new("/nonexistent/ffmpeg-binary");
        let result = FfmpegSink::create(
            &ffmpeg,
            Path::new("never.mp4"),
            PixelLayout::Bgr24,
            10,
            10,
            20.0,
            &VideoFormat::Mp4.encoder_args(),
        );
        assert!(matches!(result, Err(AppError::Encode(_))));
    }
}
