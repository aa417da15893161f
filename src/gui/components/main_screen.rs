use eframe::egui;

use crate::gui::constants::*;
use crate::locale::{DisplayContext, StringId};

/// Greeting plus the button leading to settings; returns true when clicked
pub fn ui(ui: &mut egui::Ui, display: &DisplayContext) -> bool {
    let mut open_settings = false;

    ui.vertical_centered(|ui| {
        ui.add_space(MAIN_SCREEN_TOP_SPACE);
        ui.heading(display.text(StringId::HelloWorld));
        ui.add_space(SECTION_SPACING);
        if ui.button(display.text(StringId::ChangeLanguage)).clicked() {
            open_settings = true;
        }
    });

    open_settings
}
