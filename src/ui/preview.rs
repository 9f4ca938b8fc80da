//! Live recording window; its key presses are the recorder's stop signal

use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;
use gtk::glib;
use image::RgbaImage;
use log::debug;
use std::cell::Cell;
use std::rc::Rc;

use crate::app::{Action, Region, ShortcutConfig};
use crate::capture::recorder::RecordingPreview;
use crate::error::AppResult;
use crate::ui::drawing::texture_from_image;

pub struct GtkRecordingPreview {
    window: adw::Window,
    picture: gtk::Picture,
    stop: Rc<Cell<bool>>,
}

impl GtkRecordingPreview {
    /// Opens a window at half the region size
    pub fn new(region: Region, shortcuts: ShortcutConfig) -> AppResult<Self> {
        crate::ui::init()?;

        let picture = gtk::Picture::new();
        picture.set_can_shrink(true);

        let window = adw::Window::builder()
            .title("Recording")
            .content(&picture)
            .default_width((region.width / 2).max(1) as i32)
            .default_height((region.height / 2).max(1) as i32)
            .build();

        let stop = Rc::new(Cell::new(false));

        let keys = gtk::EventControllerKey::new();
        keys.connect_key_pressed({
            let stop = stop.clone();
            move |_, key, _, modifiers| {
                if shortcuts.matches(Action::StopRecording, key, modifiers) {
                    debug!("{} requested", Action::StopRecording.label());
                    stop.set(true);
                    return glib::Propagation::Stop;
                }
                glib::Propagation::Proceed
            }
        });
        window.add_controller(keys);

        window.connect_close_request({
            let stop = stop.clone();
            move |_| {
                stop.set(true);
                glib::Propagation::Proceed
            }
        });

        window.present();

        Ok(Self {
            window,
            picture,
            stop,
        })
    }
}

impl RecordingPreview for GtkRecordingPreview {
    fn show(&mut self, frame: &RgbaImage) -> AppResult<()> {
        self.picture.set_paintable(Some(&texture_from_image(frame)));
        Ok(())
    }

    fn stop_requested(&mut self) -> bool {
        let context = glib::MainContext::default();
        while context.iteration(false) {}
        self.stop.get()
    }

    fn close(&mut self) {
        self.window.destroy();
        let context = glib::MainContext::default();
        while context.iteration(false) {}
    }
}
