#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use lang_settings::cli::{self, Cli, Command};
use lang_settings::constants::{logging, prefs};
use lang_settings::locale::{DisplayContext, apply_saved_language};
use lang_settings::persistence::{PreferenceStore, preferences_dir};
use lang_settings::{SettingsModel, gui};

fn main() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var(logging::LEVEL_ENV_VAR)
        .unwrap_or_else(|_| logging::DEFAULT_LEVEL.to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    let dir = preferences_dir(cli.config_dir.as_deref());
    let store = PreferenceStore::open(&dir, prefs::NAMESPACE);
    if let Some(path) = store.path() {
        info!(path = %path.display(), namespace = %store.namespace(), "Opened preferences");
    }

    // Saved language must be in effect before any surface exists
    let ctx = apply_saved_language(&DisplayContext::default(), &store);
    let requested = ctx.locale().requested().to_string();
    let resolved = ctx.language();
    info!(language = %requested, resolved = %resolved, "Applied startup language");

    let model = SettingsModel::new(store);

    match cli.command.unwrap_or(Command::Gui) {
        Command::Gui => gui::run_gui(model, ctx),
        command => {
            print!("{}", cli::execute(&command, &model, &ctx)?);
            Ok(())
        }
    }
}
