mod app;
mod args;
mod capture;
mod editor;
mod error;
mod ffmpeg;
mod selection;
mod ui;

use clap::Parser;
use log::{error, info};
use std::process::ExitCode;
use std::time::Duration;

use app::{CaptureMode, ShortcutConfig};
use args::{Cli, Command, EditArgs, JoinArgs, RecordArgs};
use capture::{record_screen, DesktopSession, RecordSettings};
use editor::{
    create_video_by_images, trim_and_convert_video, EditRequest, JoinRequest, OutputFormat,
};
use error::{AppError, AppResult};
use ffmpeg::Ffmpeg;
use selection::select_region_and_verify;
use ui::GtkSelectionUi;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let ffmpeg = Ffmpeg::new(cli.ffmpeg);

    let result = match cli.command {
        Command::Record(args) => record(&ffmpeg, &args),
        Command::Edit(args) => edit(&ffmpeg, args),
        Command::Join(args) => join(&ffmpeg, args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::RetriesExhausted { attempts }) => {
            // The user already saw why; nothing was recorded
            info!("No region confirmed after {} attempts, exiting", attempts);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn record(ffmpeg: &Ffmpeg, args: &RecordArgs) -> AppResult<()> {
    let session = DesktopSession::detect();
    session.log_capabilities();

    let duration = args
        .duration
        .map(|secs| {
            Duration::try_from_secs_f64(secs)
                .map_err(|_| AppError::InvalidInput(format!("Invalid duration {}", secs)))
        })
        .transpose()?;

    let mode = if args.full_screen {
        CaptureMode::FullScreen
    } else {
        CaptureMode::Selection
    };
    let mut selection_ui = GtkSelectionUi::new(ShortcutConfig::new())?;
    let region = select_region_and_verify(&mut selection_ui, mode)?;
    info!("Recording region {}", region);

    let settings = RecordSettings {
        region,
        output: args.output_path(),
        format: args.format.into(),
        fps: args.fps,
        display: args.display,
        max_duration: duration,
    };
    record_screen(ffmpeg, &settings)?;
    Ok(())
}

fn edit(ffmpeg: &Ffmpeg, args: EditArgs) -> AppResult<()> {
    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_path(&args.output));
    let request = EditRequest {
        source: args.source,
        clips: args.clips,
        crop: args.crop,
        format,
        output: args.output,
        fps: args.fps,
    };
    trim_and_convert_video(ffmpeg, &request)
}

fn join(ffmpeg: &Ffmpeg, args: JoinArgs) -> AppResult<()> {
    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_path(&args.output));
    let request = JoinRequest {
        images: args.images,
        fps: args.fps,
        format,
        output: args.output,
    };
    create_video_by_images(ffmpeg, &request)
}
