use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;
use gtk::glib;
use image::RgbaImage;
use log::debug;

use crate::error::{AppError, AppResult};
use crate::ui::drawing::texture_from_image;

const YES: i32 = 0;
const NO: i32 = 1;

fn dialog_error(e: glib::Error) -> AppError {
    AppError::Ui(e.to_string())
}

/// Blocks on a modal message with a single OK button
pub fn alert(parent: Option<&gtk::Window>, title: &str, text: &str) -> AppResult<()> {
    let dialog = gtk::AlertDialog::builder()
        .modal(true)
        .message(title)
        .detail(text)
        .build();
    dialog.set_buttons(&["OK"]);

    match glib::MainContext::default().block_on(dialog.choose_future(parent)) {
        Ok(_) => Ok(()),
        // Escape or closing the dialog counts as acknowledging it
        Err(e) if e.matches(gtk::DialogError::Dismissed) => Ok(()),
        Err(e) => Err(dialog_error(e)),
    }
}

/// Blocks on a Yes/No question; dismissing the dialog answers No
pub fn confirm(parent: Option<&gtk::Window>, title: &str, text: &str) -> AppResult<bool> {
    let dialog = gtk::AlertDialog::builder()
        .modal(true)
        .message(title)
        .detail(text)
        .default_button(YES)
        .cancel_button(NO)
        .build();
    dialog.set_buttons(&["Yes", "No"]);

    match glib::MainContext::default().block_on(dialog.choose_future(parent)) {
        Ok(choice) => Ok(choice == YES),
        Err(e) if e.matches(gtk::DialogError::Dismissed) => Ok(false),
        Err(e) => Err(dialog_error(e)),
    }
}

/// Shows the captured region at its own size and asks if it is correct
pub fn confirm_preview(image: &RgbaImage) -> AppResult<bool> {
    let picture = gtk::Picture::for_paintable(&texture_from_image(image));
    picture.set_can_shrink(true);

    let window = adw::Window::builder()
        .title("Selected Region")
        .content(&picture)
        .default_width(image.width() as i32)
        .default_height(image.height() as i32)
        .build();
    window.present();

    let answer = confirm(
        Some(window.upcast_ref()),
        "Check Region",
        "Is the selected region ok?",
    );
    debug!("Region confirmation: {:?}", answer);

    window.destroy();
    answer
}
