//! Thin wrapper around the external `ffmpeg` binary.

use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::error::{AppError, AppResult};

const STDERR_TAIL_LINES: usize = 5;

#[derive(Debug, Clone)]
pub struct Ffmpeg {
    binary: PathBuf,
}

impl Ffmpeg {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn command(&self, args: &[String]) -> Command {
        debug!("Running {} {}", self.binary.display(), args.join(" "));
        let mut cmd = Command::new(&self.binary);
        cmd.args(["-hide_banner", "-loglevel", "error"]).args(args);
        cmd
    }

    fn spawn_error(&self, e: std::io::Error) -> AppError {
        if e.kind() == ErrorKind::NotFound {
            AppError::Encode(format!("ffmpeg not found at {}", self.binary.display()))
        } else {
            AppError::Encode(format!("Failed to start ffmpeg: {}", e))
        }
    }

    /// Runs ffmpeg to completion
    pub fn run(&self, args: &[String]) -> AppResult<()> {
        let output = self
            .command(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(AppError::Encode(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                stderr_tail(&output.stderr)
            )))
        }
    }

    /// Starts ffmpeg with a writable stdin for raw frames
    pub fn spawn_piped(&self, args: &[String]) -> AppResult<Child> {
        self.command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))
    }
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

/// Last few non-empty lines of ffmpeg's stderr
pub fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join(" | ")
}

/// Formats a number for ffmpeg arguments ("20", "0.5")
pub fn number(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_keeps_last_lines() {
        let stderr = b"one\n\ntwo\nthree\nfour\nfive\nsix\n";
        assert_eq!(stderr_tail(stderr), "two | three | four | five | six");
        assert_eq!(stderr_tail(b""), "");
    }

    #[test]
    fn numbers_drop_trailing_zero() {
        assert_eq!(number(20.0), "20");
        assert_eq!(number(0.25), "0.25");
        assert_eq!(number(24.5), "24.5");
    }

    #[test]
    fn missing_binary_is_an_encode_error() {
        let ffmpeg = Ffmpeg::new("/nonexistent/ffmpeg-binary");
        let err = ffmpeg.run(&["-version".to_string()]).unwrap_err();
        assert!(matches!(err, AppError::Encode(ref msg) if msg.contains("not found")));
        assert!(ffmpeg.spawn_piped(&[]).is_err());
    }
}
