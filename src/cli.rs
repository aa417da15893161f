//! Command-line surface over the same settings the window edits

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::info;

use crate::config::SettingsModel;
use crate::locale::{DisplayContext, Language, StringId, apply_language};

#[derive(Debug, Parser)]
#[command(name = "lang-settings", version, about = "Pick the display language and light/dark theme")]
pub struct Cli {
    /// Directory holding the preference files (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Open the settings window (default)
    Gui,
    /// Print the current language and theme
    Show {
        /// Print the settings and their backing file as JSON
        #[arg(long)]
        json: bool,
    },
    /// Store a language code (en, es, fr, de; others fall back to English)
    SetLanguage { code: String },
    /// Store the theme
    SetTheme {
        #[arg(value_enum)]
        theme: Theme,
    },
    /// List supported languages
    Languages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }
}

fn theme_name(display: &DisplayContext, is_dark: bool) -> &'static str {
    if is_dark {
        display.text(StringId::DarkTheme)
    } else {
        display.text(StringId::LightTheme)
    }
}

/// Run a non-GUI command and return what should be printed
pub fn execute(command: &Command, model: &SettingsModel, display: &DisplayContext) -> Result<String> {
    let mut out = String::new();
    match command {
        Command::Gui => bail!("the gui command is handled by the entry point"),
        Command::Show { json: true } => {
            writeln!(out, "{}", serde_json::to_string_pretty(&model.snapshot())?)?;
        }
        Command::Show { json: false } => {
            let code = model.language();
            let display = apply_language(display, &code);
            writeln!(
                out,
                "{}: {} ({})",
                display.text(StringId::SelectedLanguage),
                code,
                display.text(display.language().name_id())
            )?;
            writeln!(
                out,
                "{}: {}",
                display.text(StringId::SelectedTheme),
                theme_name(&display, model.is_dark_theme())
            )?;
        }
        Command::SetLanguage { code } => {
            model.set_language(code);
            let display = apply_language(display, code);
            let resolved = display.language();
            info!(language = %code, resolved = %resolved, "Language stored");
            writeln!(
                out,
                "{}: {} ({})",
                display.text(StringId::SelectedLanguage),
                code,
                display.text(display.language().name_id())
            )?;
        }
        Command::SetTheme { theme } => {
            model.set_dark_theme(theme.is_dark());
            writeln!(
                out,
                "{}: {}",
                display.text(StringId::SelectedTheme),
                theme_name(display, theme.is_dark())
            )?;
        }
        Command::Languages => {
            let current = Language::resolve(&model.language());
            for language in Language::ALL {
                let marker = if language == current { "*" } else { " " };
                writeln!(out, "{marker} {}  {}", language.code(), display.text(language.name_id()))?;
            }
        }
    }
    Ok(out)
}
