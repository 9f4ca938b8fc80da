//! Time intervals, crop rectangles and output formats for post-processing

use std::path::Path;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// A (minutes, seconds) position in a video
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Timestamp {
    pub minutes: u32,
    pub seconds: f64,
}

impl Timestamp {
    pub fn new(minutes: u32, seconds: f64) -> Self {
        Self { minutes, seconds }
    }

    pub fn as_secs(&self) -> f64 {
        self.minutes as f64 * 60.0 + self.seconds
    }
}

/// Accepts `M:S` (`1:30`, `0:04.5`) or plain seconds (`90`)
impl FromStr for Timestamp {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidInput(format!("Invalid timestamp '{}'", s));
        let s = s.trim();

        let (minutes, seconds) = match s.split_once(':') {
            Some((m, sec)) => (m.trim().parse::<u32>().map_err(|_| invalid())?, sec),
            None => (0, s),
        };
        let seconds = seconds.trim().parse::<f64>().map_err(|_| invalid())?;
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(invalid());
        }

        Ok(Self::new(minutes, seconds))
    }
}

/// A sub-interval of the source to keep
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipSpec {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl ClipSpec {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    pub fn duration_secs(&self) -> f64 {
        self.end.as_secs() - self.start.as_secs()
    }
}

/// Accepts `START-END`, e.g. `0:24-0:32`
impl FromStr for ClipSpec {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| AppError::InvalidInput(format!("Clip '{}' is not START-END", s)))?;
        Ok(Self::new(start.parse()?, end.parse()?))
    }
}

/// Corners (x1, y1) top-left and (x2, y2) bottom-right in source pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    x1: u32,
    y1: u32,
    x2: u32,
    y2: u32,
}

impl CropRect {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Result<Self, AppError> {
        if x2 <= x1 || y2 <= y1 {
            return Err(AppError::InvalidInput(format!(
                "Crop rectangle ({}, {}, {}, {}) must have x2 > x1 and y2 > y1",
                x1, y1, x2, y2
            )));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    pub fn x(&self) -> u32 {
        self.x1
    }

    pub fn y(&self) -> u32 {
        self.y1
    }

    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }
}

/// Accepts `x1,y1,x2,y2`
impl FromStr for CropRect {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|v| v.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| AppError::InvalidInput(format!("Invalid crop rectangle '{}'", s)))?;

        match values.as_slice() {
            [x1, y1, x2, y2] => Self::new(*x1, *y1, *x2, *y2),
            _ => Err(AppError::InvalidInput(format!(
                "Crop rectangle '{}' needs four values",
                s
            ))),
        }
    }
}

/// Rejects zero, negative and non-finite frame rates
pub fn validate_fps(fps: f64) -> AppResult<f64> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(AppError::InvalidInput(format!("Invalid frame rate {}", fps)));
    }
    Ok(fps)
}

/// Target of post-processing and joining
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Gif,
    /// Container picked by ffmpeg from the output extension
    Video,
}

impl OutputFormat {
    /// GIF for a `.gif` extension, video otherwise
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("gif") => OutputFormat::Gif,
            _ => OutputFormat::Video,
        }
    }
}

/// Accepts `gif`/`.gif`, anything else that names a container means video
impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('.').to_ascii_lowercase();
        match name.as_str() {
            "gif" => Ok(OutputFormat::Gif),
            "" => Err(AppError::InvalidInput("Empty output format".to_string())),
            _ => Ok(OutputFormat::Video),
        }
    }
}
