//! GTK front end: selection overlay, dialogs and the recording preview

pub mod dialogs;
pub mod drawing;
pub mod overlay;
pub mod preview;

use gtk4 as gtk;
use libadwaita as adw;

use crate::app::{MouseState, Region, ShortcutConfig};
use crate::capture::{capture_region, screen_size};
use crate::error::{AppError, AppResult};
use crate::selection::{MouseHook, SelectionUi};

use overlay::GtkMouseHook;

/// Initialises GTK and libadwaita; safe to call more than once
pub fn init() -> AppResult<()> {
    if gtk::is_initialized_main_thread() {
        return Ok(());
    }
    adw::init().map_err(|e| AppError::Ui(format!("Failed to initialise GTK: {}", e)))
}

/// Desktop implementation of the region confirmation UI
pub struct GtkSelectionUi {
    hook: GtkMouseHook,
}

impl GtkSelectionUi {
    pub fn new(shortcuts: ShortcutConfig) -> AppResult<Self> {
        init()?;
        Ok(Self {
            hook: GtkMouseHook::new(shortcuts),
        })
    }
}

impl SelectionUi for GtkSelectionUi {
    fn screen_size(&mut self) -> AppResult<(u32, u32)> {
        screen_size()
    }

    fn alert(&mut self, title: &str, text: &str) -> AppResult<()> {
        dialogs::alert(None, title, text)
    }

    fn track_mouse(&mut self) -> AppResult<MouseState> {
        self.hook.listen()
    }

    fn confirm_region(&mut self, region: Region) -> AppResult<bool> {
        let image = capture_region(region)?;
        dialogs::confirm_preview(&image)
    }
}
