//! Light/dark selector section of the settings screen

use eframe::egui;

use crate::gui::constants::*;
use crate::locale::{DisplayContext, StringId};

fn theme_label(display: &DisplayContext, is_dark: bool) -> &'static str {
    if is_dark {
        display.text(StringId::DarkTheme)
    } else {
        display.text(StringId::LightTheme)
    }
}

/// Renders the theme picker and returns Some(is_dark) when the user picks one
pub fn ui(ui: &mut egui::Ui, display: &DisplayContext, is_dark: bool) -> Option<bool> {
    let mut choice = None;

    ui.group(|ui| {
        ui.label(
            egui::RichText::new(display.text(StringId::SelectTheme))
                .heading()
                .strong(),
        );
        ui.add_space(ITEM_SPACING);

        ui.horizontal(|ui| {
            ui.label(format!("{}:", display.text(StringId::SelectedTheme)));
            ui.add_space(5.0);

            let mut selected = is_dark;
            egui::ComboBox::from_id_salt(THEME_COMBO_ID)
                .selected_text(theme_label(display, is_dark))
                .show_ui(ui, |ui| {
                    for option in [true, false] {
                        if ui
                            .selectable_value(&mut selected, option, theme_label(display, option))
                            .clicked()
                        {
                            choice = Some(option);
                        }
                    }
                });
        });
    });

    choice
}
