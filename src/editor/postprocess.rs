//! Crop, trim and convert an existing video

use log::info;
use std::path::PathBuf;

use crate::editor::clip::{validate_fps, ClipSpec, CropRect, OutputFormat};
use crate::error::{AppError, AppResult};
use crate::ffmpeg::{self, Ffmpeg};

#[derive(Debug, Clone)]
pub struct EditRequest {
    pub source: PathBuf,
    /// Kept in list order; empty keeps the whole source
    pub clips: Vec<ClipSpec>,
    pub crop: Option<CropRect>,
    pub format: OutputFormat,
    pub output: PathBuf,
    pub fps: f64,
}

/// Builds the filter graph: crop, then per-clip trims joined in order, then
/// the output-specific tail. The final stream is labelled `[vout]`.
pub fn filter_graph(request: &EditRequest) -> String {
    let mut chains = Vec::new();
    let crop = request
        .crop
        .map(|c| format!("crop={}:{}:{}:{}", c.width(), c.height(), c.x(), c.y()));

    let timeline = if request.clips.is_empty() {
        match crop {
            Some(crop) => {
                chains.push(format!("[0:v]{}[src]", crop));
                "[src]".to_string()
            }
            None => "[0:v]".to_string(),
        }
    } else {
        let n = request.clips.len();
        let outputs: String = (0..n).map(|i| format!("[s{}]", i)).collect();
        let head = match crop {
            Some(crop) => format!("{},", crop),
            None => String::new(),
        };
        chains.push(format!("[0:v]{}split={}{}", head, n, outputs));

        for (i, clip) in request.clips.iter().enumerate() {
            chains.push(format!(
                "[s{i}]trim=start={}:end={},setpts=PTS-STARTPTS[c{i}]",
                ffmpeg::number(clip.start.as_secs()),
                ffmpeg::number(clip.end.as_secs()),
            ));
        }

        let inputs: String = (0..n).map(|i| format!("[c{}]", i)).collect();
        chains.push(format!("{}concat=n={}:v=1:a=0[joined]", inputs, n));
        "[joined]".to_string()
    };

    let fps = ffmpeg::number(request.fps);
    match request.format {
        OutputFormat::Gif => chains.push(format!(
            "{}fps={},split[g0][g1];[g0]palettegen[pal];[g1][pal]paletteuse[vout]",
            timeline, fps
        )),
        OutputFormat::Video => chains.push(format!(
            "{}fps={},scale=trunc(iw/2)*2:trunc(ih/2)*2[vout]",
            timeline, fps
        )),
    }

    chains.join(";")
}

pub fn edit_args(request: &EditRequest) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "-y".into(),
        "-i".into(),
        request.source.to_string_lossy().into_owned(),
        "-filter_complex".into(),
        filter_graph(request),
        "-map".into(),
        "[vout]".into(),
        "-an".into(),
    ];

    match request.format {
        OutputFormat::Gif => args.extend(["-loop", "0"].map(String::from)),
        OutputFormat::Video => args.extend(["-pix_fmt", "yuv420p"].map(String::from)),
    }

    args.push(request.output.to_string_lossy().into_owned());
    args
}

fn validate(request: &EditRequest) -> AppResult<()> {
    validate_fps(request.fps)?;
    for clip in &request.clips {
        if clip.duration_secs() <= 0.0 {
            return Err(AppError::InvalidInput(format!(
                "Clip {}s-{}s ends before it starts",
                ffmpeg::number(clip.start.as_secs()),
                ffmpeg::number(clip.end.as_secs())
            )));
        }
    }
    Ok(())
}

/// Re-encodes `request.source` into `request.output`. Clip bounds are not
/// checked against the source duration.
pub fn trim_and_convert_video(ffmpeg: &Ffmpeg, request: &EditRequest) -> AppResult<()> {
    validate(request)?;
    if !request.source.is_file() {
        return Err(AppError::SourceUnavailable {
            path: request.source.clone(),
        });
    }

    info!(
        "Converting {} -> {} ({} clips, crop: {})",
        request.source.display(),
        request.output.display(),
        request.clips.len(),
        request.crop.is_some()
    );
    ffmpeg.run(&edit_args(request))?;
    info!("Wrote {}", request.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::clip::Timestamp;

    fn request(clips: Vec<ClipSpec>, crop: Option<CropRect>, format: OutputFormat) -> EditRequest {
        EditRequest {
            source: PathBuf::from("data/test_recording.mp4"),
            clips,
            crop,
            format,
            output: PathBuf::from("data/out.gif"),
            fps: 1.0,
        }
    }

    #[test]
    fn conversion_only_keeps_full_timeline() {
        let req = request(Vec::new(), None, OutputFormat::Video);
        let graph = filter_graph(&req);

        assert!(!graph.contains("trim"));
        assert!(!graph.contains("concat"));
        assert!(!graph.contains("crop"));
        assert!(graph.starts_with("[0:v]fps=1,"));
    }

    #[test]
    fn crop_happens_before_trimming() {
        let clips = vec![
            ClipSpec::new(Timestamp::new(0, 0.0), Timestamp::new(0, 8.0)),
            ClipSpec::new(Timestamp::new(0, 24.0), Timestamp::new(0, 32.0)),
        ];
        let crop = CropRect::new(10, 240, 610, 680).ok();
        let graph = filter_graph(&request(clips, crop, OutputFormat::Gif));

        let crop_at = graph.find("crop=600:440:10:240").unwrap();
        let trim_at = graph.find("trim=").unwrap();
        assert!(crop_at < trim_at);
        assert!(graph.contains("split=2[s0][s1]"));
        assert!(graph.contains("[s1]trim=start=24:end=32,setpts=PTS-STARTPTS[c1]"));
        assert!(graph.contains("[c0][c1]concat=n=2:v=1:a=0[joined]"));
        assert!(graph.contains("paletteuse[vout]"));
    }

    #[test]
    fn clips_keep_list_order() {
        let clips = vec![
            ClipSpec::new(Timestamp::new(1, 0.0), Timestamp::new(1, 5.0)),
            ClipSpec::new(Timestamp::new(0, 2.0), Timestamp::new(0, 4.0)),
        ];
        let graph = filter_graph(&request(clips, None, OutputFormat::Video));

        let first = graph.find("start=60:end=65").unwrap();
        let second = graph.find("start=2:end=4").unwrap();
        assert!(first < second);
        assert!(graph.starts_with("[0:v]split=2"));
    }

    #[test]
    fn gif_output_loops_and_drops_audio() {
        let args = edit_args(&request(Vec::new(), None, OutputFormat::Gif));
        assert!(args.windows(2).any(|w| w == ["-loop", "0"]));
        assert!(args.windows(2).any(|w| w == ["-map", "[vout]"]));
        assert!(args.contains(&"-an".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("data/out.gif"));
    }

    #[test]
    fn bad_frame_rate_never_reaches_ffmpeg() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("recording.mp4");
        std::fs::write(&source, b"not really a video").unwrap();
        // A binary that cannot exist; reaching it would fail differently
        let ffmpeg = Ffmpeg::new(dir.path().join("no-ffmpeg-here"));

        for fps in [0.0, -3.0, f64::NAN] {
            let mut req = request(Vec::new(), None, OutputFormat::Gif);
            req.source = source.clone();
            req.fps = fps;
            assert!(matches!(
                trim_and_convert_video(&ffmpeg, &req),
                Err(AppError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn reversed_clip_is_rejected() {
        let clips = vec![ClipSpec::new(Timestamp::new(0, 32.0), Timestamp::new(0, 24.0))];
        let req = request(clips, None, OutputFormat::Video);
        assert!(matches!(
            trim_and_convert_video(&Ffmpeg::default(), &req),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn missing_source_is_reported() {
        let mut req = request(Vec::new(), None, OutputFormat::Gif);
        req.source = PathBuf::from("/nonexistent/recording.mp4");
        let err = trim_and_convert_video(&Ffmpeg::default(), &req).unwrap_err();
        assert!(matches!(err, AppError::SourceUnavailable { .. }));
    }
}
