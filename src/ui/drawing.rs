use gtk4 as gtk;

use gtk::{gdk, glib};
use image::RgbaImage;

use crate::app::Point;

/// Convert an RGBA capture into a texture GTK can paint
pub fn texture_from_image(image: &RgbaImage) -> gdk::MemoryTexture {
    let width = image.width() as i32;
    let height = image.height() as i32;
    let stride = image.width() as usize * 4; // RGBA = 4 bytes per pixel
    let bytes = glib::Bytes::from(image.as_raw().as_slice());

    gdk::MemoryTexture::new(width, height, gdk::MemoryFormat::R8g8b8a8, &bytes, stride)
}

/// Maps widget coordinates on a stretched screenshot back to screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMapping {
    pub origin: (i32, i32),
    pub image_size: (u32, u32),
}

impl ScreenMapping {
    pub fn to_screen(&self, x: f64, y: f64, widget_width: i32, widget_height: i32) -> Point {
        let scale_x = if widget_width > 0 {
            self.image_size.0 as f64 / widget_width as f64
        } else {
            1.0
        };
        let scale_y = if widget_height > 0 {
            self.image_size.1 as f64 / widget_height as f64
        } else {
            1.0
        };

        Point::new(
            self.origin.0 + (x * scale_x).round() as i32,
            self.origin.1 + (y * scale_y).round() as i32,
        )
    }
}

/// Selection rectangle in widget coordinates, as dragged so far
#[derive(Default, Clone, Copy, Debug)]
pub struct RubberBand {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl RubberBand {
    pub fn new(start_x: f64, start_y: f64) -> Self {
        Self {
            start_x,
            start_y,
            end_x: start_x,
            end_y: start_y,
        }
    }

    /// Normalized (x, y, width, height)
    pub fn rectangle(&self) -> (f64, f64, f64, f64) {
        (
            self.start_x.min(self.end_x),
            self.start_y.min(self.end_y),
            (self.start_x - self.end_x).abs(),
            (self.start_y - self.end_y).abs(),
        )
    }
}

/// Dims everything outside the band and outlines it
pub fn draw_selection_overlay(
    cr: &gtk::cairo::Context,
    band: Option<RubberBand>,
    da_width: f64,
    da_height: f64,
) -> Result<(), gtk::cairo::Error> {
    cr.set_source_rgba(0.0, 0.0, 0.0, 0.35);

    let Some(band) = band else {
        cr.rectangle(0.0, 0.0, da_width, da_height);
        return cr.fill();
    };

    let (rx, ry, rw, rh) = band.rectangle();

    cr.rectangle(0.0, 0.0, da_width, ry);

    cr.rectangle(0.0, ry + rh, da_width, da_height - (ry + rh));

    cr.rectangle(0.0, ry, rx, rh);

    cr.rectangle(rx + rw, ry, da_width - (rx + rw), rh);
    cr.fill()?;

    cr.set_source_rgb(1.0, 1.0, 1.0);
    cr.set_line_width(2.0);
    cr.rectangle(rx, ry, rw, rh);
    cr.stroke()
}
