//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Preference namespace layout
pub mod prefs {
    /// Name of the shared key-value namespace holding the user settings
    pub const NAMESPACE: &str = "settings";

    /// Selected language code (string)
    pub const KEY_LANGUAGE: &str = "language";

    /// Dark theme enabled (boolean)
    pub const KEY_DARK_THEME: &str = "dark_theme";

    /// Language used when nothing has been stored yet
    pub const DEFAULT_LANGUAGE: &str = "en";

    /// Light theme by default
    pub const DEFAULT_DARK_THEME: bool = false;

    /// File extension of a persisted namespace
    pub const FILE_EXTENSION: &str = "json";
}

/// Config directory resolution
pub mod config {
    /// Directory created under the platform config dir
    pub const APP_DIR: &str = "lang-settings";

    /// Environment variable overriding the preference directory
    pub const DIR_ENV_VAR: &str = "LANG_SETTINGS_DIR";
}

/// Logging setup
pub mod logging {
    /// Environment variable selecting the max tracing level
    pub const LEVEL_ENV_VAR: &str = "LOG_LEVEL";

    pub const DEFAULT_LEVEL: &str = "info";
}
