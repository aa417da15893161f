//! Locale handling: supported languages, the process-wide default locale and
//! the display context UI surfaces resolve their text through.
//!
//! [`apply_language`] is the only mutator of the process default. Call it once
//! at startup and again whenever a surface is constructed, since a surface
//! keeps the context it was built with.

pub mod strings;

use std::fmt;
use std::sync::{LazyLock, PoisonError, RwLock};
use tracing::{debug, warn};

pub use strings::StringId;

use crate::constants::prefs::{DEFAULT_LANGUAGE, KEY_LANGUAGE};
use crate::persistence::PreferenceStore;

/// Languages with a bundled string table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Spanish,
    French,
    German,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
    ];

    /// Used for codes without a bundled table
    pub const FALLBACK: Language = Language::English;

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
        }
    }

    /// Match on the primary subtag, so `es-MX` and `de_AT` resolve too
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::ALL.into_iter().find(|lang| lang.code() == primary)
    }

    pub fn resolve(code: &str) -> Self {
        Self::from_code(code).unwrap_or(Self::FALLBACK)
    }

    /// String resource holding this language's display name
    pub fn name_id(self) -> StringId {
        match self {
            Language::English => StringId::English,
            Language::Spanish => StringId::Spanish,
            Language::French => StringId::French,
            Language::German => StringId::German,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A requested language code and the language text actually resolves in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    requested: String,
    language: Language,
}

impl Locale {
    pub fn new(code: &str) -> Self {
        Self {
            requested: code.to_string(),
            language: Language::resolve(code),
        }
    }

    pub fn requested(&self) -> &str {
        &self.requested
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_fallback(&self) -> bool {
        Language::from_code(&self.requested).is_none()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

static DEFAULT_LOCALE: LazyLock<RwLock<Locale>> = LazyLock::new(|| RwLock::new(Locale::default()));

/// Current process-wide default locale
pub fn default_locale() -> Locale {
    DEFAULT_LOCALE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Resource-resolution context handed to UI surfaces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayContext {
    locale: Locale,
}

impl DisplayContext {
    /// Context resolving in the current process default locale
    pub fn from_default_locale() -> Self {
        Self {
            locale: default_locale(),
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn language(&self) -> Language {
        self.locale.language
    }

    pub fn text(&self, id: StringId) -> &'static str {
        strings::lookup(self.locale.language, id)
    }
}

/// Make `code` the process default and return `base` resolving text in it
///
/// Unsupported codes resolve to [`Language::FALLBACK`]. Applying the same code
/// again yields an identical context.
pub fn apply_language(base: &DisplayContext, code: &str) -> DisplayContext {
    let locale = Locale::new(code);
    if locale.is_fallback() {
        warn!(requested = %code, fallback = %Language::FALLBACK, "Unsupported language code, using fallback");
    }

    {
        let mut current = DEFAULT_LOCALE.write().unwrap_or_else(PoisonError::into_inner);
        if *current != locale {
            debug!(from = %current.requested, to = %code, "Default locale changed");
            *current = locale.clone();
        }
    }

    let mut context = base.clone();
    context.locale = locale;
    context
}

/// Apply whatever language is stored in `store`; used before any UI exists
pub fn apply_saved_language(base: &DisplayContext, store: &PreferenceStore) -> DisplayContext {
    let code = store.get_string(KEY_LANGUAGE, DEFAULT_LANGUAGE);
    debug!(language = %code, "Applying saved language");
    apply_language(base, &code)
}

/// apply_language mutates process state; tests touching it hold this lock
#[cfg(test)]
pub(crate) static LOCALE_GUARD: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        for language in Language::ALL {
            assert_eq!(Language::from_code(language.code()), Some(language));
        }
        assert_eq!(Language::from_code("es-MX"), Some(Language::Spanish));
        assert_eq!(Language::from_code("DE_at"), Some(Language::German));
        assert_eq!(Language::from_code("xx"), None);
        assert_eq!(Language::from_code(""), None);
        assert_eq!(Language::resolve("pt"), Language::English);
    }

    #[test]
    fn test_locale_keeps_requested_code() {
        let locale = Locale::new("it");
        assert_eq!(locale.requested(), "it");
        assert_eq!(locale.language(), Language::English);
        assert!(locale.is_fallback());
        assert!(!Locale::new("fr").is_fallback());
    }

    #[test]
    fn test_apply_language_resolves_text() {
        let _guard = LOCALE_GUARD.lock().unwrap_or_else(PoisonError::into_inner);
        let ctx = apply_language(&DisplayContext::default(), "de");
        assert_eq!(ctx.language(), Language::German);
        assert_eq!(ctx.text(StringId::HelloWorld), "Hallo Welt!");
        assert_eq!(default_locale().language(), Language::German);
        assert_eq!(DisplayContext::from_default_locale(), ctx);
    }

    #[test]
    fn test_apply_language_is_idempotent() {
        let _guard = LOCALE_GUARD.lock().unwrap_or_else(PoisonError::into_inner);
        let base = DisplayContext::default();
        let once = apply_language(&base, "es");
        let twice = apply_language(&apply_language(&base, "es"), "es");
        assert_eq!(once, twice);
        assert_eq!(twice.text(StringId::ChangeLanguage), "Cambiar idioma");
        assert_eq!(default_locale(), Locale::new("es"));
    }

    #[test]
    fn test_apply_language_leaves_base_untouched() {
        let _guard = LOCALE_GUARD.lock().unwrap_or_else(PoisonError::into_inner);
        let base = DisplayContext::default();
        let _ = apply_language(&base, "fr");
        assert_eq!(base.language(), Language::English);
    }

    #[test]
    fn test_unknown_code_falls_back() {
        let _guard = LOCALE_GUARD.lock().unwrap_or_else(PoisonError::into_inner);
        let ctx = apply_language(&DisplayContext::default(), "klingon");
        assert_eq!(ctx.language(), Language::FALLBACK);
        assert_eq!(ctx.locale().requested(), "klingon");
        assert_eq!(ctx.text(StringId::HelloWorld), "Hello World!");
    }

    #[test]
    fn test_apply_saved_language() {
        let _guard = LOCALE_GUARD.lock().unwrap_or_else(PoisonError::into_inner);
        let store = PreferenceStore::in_memory("settings");
        let ctx = apply_saved_language(&DisplayContext::default(), &store);
        assert_eq!(ctx.language(), Language::English);

        store.set_string(KEY_LANGUAGE, "fr");
        let ctx = apply_saved_language(&DisplayContext::default(), &store);
        assert_eq!(ctx.language(), Language::French);
    }
}
