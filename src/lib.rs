#![forbid(unsafe_code)]
//! Language and light/dark theme settings persisted in a flat key-value
//! namespace, with change notification and a process-wide locale applier.

pub mod cli;
pub mod config;
pub mod constants;
pub mod gui;
pub mod locale;
pub mod persistence;

pub use config::{SettingsModel, Subscription};
pub use locale::{DisplayContext, Language, apply_language};
pub use persistence::PreferenceStore;
