//! Settings window implemented with egui/eframe

use anyhow::{Result, anyhow};
use eframe::{CreationContext, NativeOptions, egui};
use tracing::{debug, info};

use super::components::{language_settings, main_screen, theme_settings};
use super::constants::*;
use crate::config::{SettingsModel, Subscription};
use crate::locale::{DisplayContext, Language, StringId, apply_language};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Main,
    Settings,
}

/// A constructed screen. Text resolves through the context captured when the
/// surface was built, so the language is re-applied on every construction.
#[derive(Debug)]
struct Surface {
    screen: Screen,
    display: DisplayContext,
}

impl Surface {
    fn construct(screen: Screen, base: &DisplayContext, model: &SettingsModel) -> Self {
        let display = apply_language(base, &model.language());
        let language = display.language();
        info!(screen = ?screen, language = %language, "Constructed surface");
        Self { screen, display }
    }
}

struct SettingsApp {
    model: SettingsModel,
    base: DisplayContext,
    surface: Surface,
    subscriptions: Vec<Subscription>,
    applied_dark: Option<bool>,
    applied_title: Option<&'static str>,
}

impl SettingsApp {
    fn new(cc: &CreationContext<'_>, model: SettingsModel, base: DisplayContext) -> Self {
        info!("Initializing settings window");

        // Settings can also change from another writer; repaint so the frame catches up
        let repaint = cc.egui_ctx.clone();
        let language_sub = model.subscribe_language(move |_| repaint.request_repaint());
        let repaint = cc.egui_ctx.clone();
        let theme_sub = model.subscribe_theme(move |_| repaint.request_repaint());

        let surface = Surface::construct(Screen::Main, &base, &model);

        Self {
            model,
            base,
            surface,
            subscriptions: vec![language_sub, theme_sub],
            applied_dark: None,
            applied_title: None,
        }
    }

    fn navigate(&mut self, screen: Screen) {
        debug!(from = ?self.surface.screen, to = ?screen, "Navigating");
        self.surface = Surface::construct(screen, &self.base, &self.model);
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        let dark = self.model.is_dark_theme();
        if self.applied_dark != Some(dark) {
            debug!(dark_theme = dark, "Applying visuals");
            ctx.set_visuals(if dark {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            self.applied_dark = Some(dark);
        }
    }

    fn apply_title(&mut self, ctx: &egui::Context) {
        let title = self.surface.display.text(StringId::AppTitle);
        if self.applied_title != Some(title) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.to_string()));
            self.applied_title = Some(title);
        }
    }

    /// Store the picked language and re-resolve the visible surface now
    /// instead of waiting for the next construction
    fn select_language(&mut self, language: Language) {
        self.model.set_language(language.code());
        self.surface.display = apply_language(&self.base, language.code());
    }

    fn settings_ui(&mut self, ui: &mut egui::Ui) -> Option<Screen> {
        let mut next = None;

        if ui
            .button(format!("\u{2190} {}", self.surface.display.text(StringId::Back)))
            .clicked()
        {
            next = Some(Screen::Main);
        }
        ui.add_space(SECTION_SPACING);

        if let Some(language) = language_settings::ui(ui, &self.surface.display, &self.model.language()) {
            self.select_language(language);
        }

        ui.add_space(SECTION_SPACING);

        // Read the surface again: a language picked above must reach this section in the same frame
        if let Some(dark) = theme_settings::ui(ui, &self.surface.display, self.model.is_dark_theme()) {
            self.model.set_dark_theme(dark);
        }

        next
    }
}

impl eframe::App for SettingsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme(ctx);
        self.apply_title(ctx);

        let mut next = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(PADDING);
            match self.surface.screen {
                Screen::Main => {
                    if main_screen::ui(ui, &self.surface.display) {
                        next = Some(Screen::Settings);
                    }
                }
                Screen::Settings => {
                    next = self.settings_ui(ui);
                }
            }
        });

        if let Some(screen) = next {
            self.navigate(screen);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        for subscription in self.subscriptions.drain(..) {
            self.model.unsubscribe(&subscription);
        }
        info!("Settings window exiting");
    }
}

/// Open the settings window; blocks until it is closed
///
/// `base` should already carry the startup language (see `apply_saved_language`).
pub fn run_gui(model: SettingsModel, base: DisplayContext) -> Result<()> {
    let title = base.text(StringId::AppTitle);
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size(WINDOW_MIN_SIZE)
            .with_title(title),
        ..Default::default()
    };

    eframe::run_native(
        env!("CARGO_PKG_NAME"),
        options,
        Box::new(|cc| Ok(Box::new(SettingsApp::new(cc, model, base)))),
    )
    .map_err(|err| anyhow!("Failed to launch settings window: {err}"))
}
