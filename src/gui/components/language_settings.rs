//! Language selector section of the settings screen

use eframe::egui;

use crate::gui::constants::*;
use crate::locale::{DisplayContext, Language, StringId};

/// Renders the language picker and returns the language the user clicked, if any
///
/// `selected_code` is the stored code; unsupported codes display as the
/// fallback language's name.
pub fn ui(ui: &mut egui::Ui, display: &DisplayContext, selected_code: &str) -> Option<Language> {
    let mut choice = None;
    let current = Language::resolve(selected_code);

    ui.group(|ui| {
        ui.label(
            egui::RichText::new(display.text(StringId::SelectLanguage))
                .heading()
                .strong(),
        );
        ui.add_space(ITEM_SPACING);

        ui.horizontal(|ui| {
            ui.label(format!("{}:", display.text(StringId::SelectedLanguage)));
            ui.add_space(5.0);

            let mut selected = current;
            egui::ComboBox::from_id_salt(LANGUAGE_COMBO_ID)
                .selected_text(display.text(current.name_id()))
                .show_ui(ui, |ui| {
                    for language in Language::ALL {
                        if ui
                            .selectable_value(&mut selected, language, display.text(language.name_id()))
                            .clicked()
                        {
                            choice = Some(language);
                        }
                    }
                });
        });
    });

    choice
}
