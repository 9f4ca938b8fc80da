//! Interactive select-preview-confirm loop

use log::{info, warn};

use crate::app::{CaptureMode, MouseState, Region};
use crate::error::{AppError, AppResult};
use crate::selection::region::select_region;

pub const MAX_ATTEMPTS: usize = 3;

/// Everything the confirmation loop needs from the desktop
pub trait SelectionUi {
    /// Size of the primary screen in capture pixels
    fn screen_size(&mut self) -> AppResult<(u32, u32)>;

    /// Blocking notification with a single acknowledge button
    fn alert(&mut self, title: &str, text: &str) -> AppResult<()>;

    /// Blocks until a drag completes or the hook is interrupted
    fn track_mouse(&mut self) -> AppResult<MouseState>;

    /// Shows the captured region and asks whether it is correct
    fn confirm_region(&mut self, region: Region) -> AppResult<bool>;
}

/// Returns a confirmed region, or `RetriesExhausted` after the user has
/// rejected (or failed to draw) a region `MAX_ATTEMPTS` times.
pub fn select_region_and_verify(
    ui: &mut impl SelectionUi,
    mode: CaptureMode,
) -> AppResult<Region> {
    if mode == CaptureMode::FullScreen {
        let (width, height) = ui.screen_size()?;
        return Region::full_screen(width, height).ok_or_else(|| {
            AppError::Capture(format!("Screen reports an empty size {}x{}", width, height))
        });
    }

    for attempt in 1..=MAX_ATTEMPTS {
        ui.alert("Select Region", "Please Select Region")?;

        let state = ui.track_mouse()?;
        let region = match select_region(&state) {
            Ok(region) => region,
            Err(e) => {
                warn!("Attempt {}/{}: {}", attempt, MAX_ATTEMPTS, e);
                continue;
            }
        };
        info!("Attempt {}/{}: selected {}", attempt, MAX_ATTEMPTS, region);

        if ui.confirm_region(region)? {
            return Ok(region);
        }
    }

    ui.alert("Exceeding max retries", "Exceed max retries")?;
    ui.alert("Invalid Region", "Selected Region is not valid!")?;
    Err(AppError::RetriesExhausted {
        attempts: MAX_ATTEMPTS,
    })
}
