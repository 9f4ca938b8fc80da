//! Full-screen selection overlay acting as the global mouse hook
//!
//! Freezes the primary monitor into a borderless full-screen window and feeds
//! left-button drags into a [`MouseTracker`] until it reports a real drag.

use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;
use gtk::{gdk, glib, DrawingArea, GestureDrag};
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::app::{Action, MouseState, ShortcutConfig};
use crate::capture::capture_primary_monitor;
use crate::error::AppResult;
use crate::selection::{MouseHook, MouseTracker};
use crate::ui::drawing::{self, RubberBand, ScreenMapping};

/// Time for the compositor to unmap the overlay before anything is captured
const OVERLAY_SETTLE_DELAY: Duration = Duration::from_millis(150);

pub struct GtkMouseHook {
    shortcuts: ShortcutConfig,
}

impl GtkMouseHook {
    pub fn new(shortcuts: ShortcutConfig) -> Self {
        Self { shortcuts }
    }
}

impl MouseHook for GtkMouseHook {
    fn listen(&mut self) -> AppResult<MouseState> {
        let (screenshot, monitor) = capture_primary_monitor()?;
        let mapping = ScreenMapping {
            origin: monitor.physical_origin(screenshot.width()),
            image_size: screenshot.dimensions(),
        };

        let tracker = Rc::new(RefCell::new(MouseTracker::new()));
        let band: Rc<RefCell<Option<RubberBand>>> = Rc::new(RefCell::new(None));
        let main_loop = glib::MainLoop::new(None, false);

        let picture = gtk::Picture::for_paintable(&drawing::texture_from_image(&screenshot));
        picture.set_content_fit(gtk::ContentFit::Fill);

        let drawing_area = DrawingArea::builder().hexpand(true).vexpand(true).build();
        drawing_area.set_cursor_from_name(Some("crosshair"));
        drawing_area.set_draw_func({
            let band = band.clone();
            move |_, cr, width, height| {
                let current = *band.borrow();
                if let Err(e) =
                    drawing::draw_selection_overlay(cr, current, width as f64, height as f64)
                {
                    warn!("Failed to draw selection: {}", e);
                }
            }
        });

        let overlay = gtk::Overlay::builder().child(&picture).build();
        overlay.add_overlay(&drawing_area);

        let window = adw::Window::builder()
            .title("Select Region")
            .decorated(false)
            .content(&overlay)
            .build();

        connect_drag(&drawing_area, &window, &tracker, &band, mapping);

        let keys = gtk::EventControllerKey::new();
        keys.connect_key_pressed({
            let window = window.clone();
            let shortcuts = self.shortcuts.clone();
            move |_, key, _, modifiers| {
                if shortcuts.matches(Action::CancelSelection, key, modifiers) {
                    debug!("{} requested", Action::CancelSelection.label());
                    window.close();
                    return glib::Propagation::Stop;
                }
                glib::Propagation::Proceed
            }
        });
        window.add_controller(keys);

        window.connect_close_request({
            let main_loop = main_loop.clone();
            move |_| {
                main_loop.quit();
                glib::Propagation::Proceed
            }
        });

        window.fullscreen();
        window.present();
        main_loop.run();

        let context = glib::MainContext::default();
        while context.iteration(false) {}
        std::thread::sleep(OVERLAY_SETTLE_DELAY);

        let state = tracker.borrow().state();
        if !state.is_complete() {
            debug!("Selection overlay closed before a drag completed");
        }
        Ok(state)
    }
}

fn connect_drag(
    drawing_area: &DrawingArea,
    window: &adw::Window,
    tracker: &Rc<RefCell<MouseTracker>>,
    band: &Rc<RefCell<Option<RubberBand>>>,
    mapping: ScreenMapping,
) {
    let drag = GestureDrag::new();
    drag.set_button(gdk::BUTTON_PRIMARY);

    drag.connect_drag_begin({
        let tracker = tracker.clone();
        let band = band.clone();
        let drawing_area = drawing_area.clone();
        move |_, x, y| {
            let point = mapping.to_screen(x, y, drawing_area.width(), drawing_area.height());
            tracker.borrow_mut().on_press(point);
            *band.borrow_mut() = Some(RubberBand::new(x, y));
            drawing_area.queue_draw();
        }
    });

    drag.connect_drag_update({
        let band = band.clone();
        let drawing_area = drawing_area.clone();
        move |_, offset_x, offset_y| {
            if let Some(ref mut current) = *band.borrow_mut() {
                current.end_x = current.start_x + offset_x;
                current.end_y = current.start_y + offset_y;
            }
            drawing_area.queue_draw();
        }
    });

    drag.connect_drag_end({
        let tracker = tracker.clone();
        let band = band.clone();
        let drawing_area = drawing_area.clone();
        let window = window.clone();
        move |gesture, offset_x, offset_y| {
            let Some((start_x, start_y)) = gesture.start_point() else {
                return;
            };
            let point = mapping.to_screen(
                start_x + offset_x,
                start_y + offset_y,
                drawing_area.width(),
                drawing_area.height(),
            );

            let flow = tracker.borrow_mut().on_release(point);
            if flow.is_break() {
                window.close();
            } else {
                *band.borrow_mut() = None;
                drawing_area.queue_draw();
            }
        }
    });

    drawing_area.add_controller(drag);
}
