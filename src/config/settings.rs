//! Settings model: observable language and theme backed by the preference store
//!
//! The model is the only writer of the `language` and `dark_theme` keys. Every
//! setter updates the in-memory value, writes it through to the store and then
//! notifies this model's observers, in that order. Other models open on the
//! same namespace pick the change up through a store listener.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, info};

use super::observable::{Observable, ObserverId};
use crate::constants::prefs::{DEFAULT_DARK_THEME, DEFAULT_LANGUAGE, KEY_DARK_THEME, KEY_LANGUAGE};
use crate::persistence::{ListenerId, PreferenceStore};

/// Which setting a subscription watches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    Language,
    DarkTheme,
}

/// Handle returned by the `subscribe_*` methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    setting: Setting,
    id: ObserverId,
}

impl Subscription {
    pub fn setting(&self) -> Setting {
        self.setting
    }
}

/// Point-in-time view of a model, as printed by `show --json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub language: String,
    pub dark_theme: bool,
}

struct SettingsState {
    language: Observable<String>,
    dark_theme: Observable<bool>,
    // Serialize each setter's update, write and notify so observers end on the last write
    language_write: Mutex<()>,
    dark_theme_write: Mutex<()>,
}

fn write_guard(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SettingsState {
    /// Pull a key changed by another writer into the observable projection
    fn sync_from_store(&self, store: &PreferenceStore, key: &str) {
        match key {
            KEY_LANGUAGE => {
                if self.language.refresh(store.get_string(KEY_LANGUAGE, DEFAULT_LANGUAGE)) {
                    debug!(language = %self.language.get(), "Language changed by another writer");
                }
            }
            KEY_DARK_THEME => {
                if self.dark_theme.refresh(store.get_bool(KEY_DARK_THEME, DEFAULT_DARK_THEME)) {
                    debug!(dark_theme = self.dark_theme.get(), "Theme changed by another writer");
                }
            }
            _ => {}
        }
    }
}

pub struct SettingsModel {
    store: PreferenceStore,
    state: Arc<SettingsState>,
    store_listener: ListenerId,
}

impl SettingsModel {
    /// Load both settings from `store`, resolving absent keys to their defaults
    pub fn new(store: PreferenceStore) -> Self {
        let state = Arc::new(SettingsState {
            language: Observable::new(store.get_string(KEY_LANGUAGE, DEFAULT_LANGUAGE)),
            dark_theme: Observable::new(store.get_bool(KEY_DARK_THEME, DEFAULT_DARK_THEME)),
            language_write: Mutex::new(()),
            dark_theme_write: Mutex::new(()),
        });

        let weak: Weak<SettingsState> = Arc::downgrade(&state);
        let store_listener = store.register_listener(move |store, key| {
            if let Some(state) = weak.upgrade() {
                state.sync_from_store(store, key);
            }
        });

        debug!(language = %state.language.get(), dark_theme = state.dark_theme.get(), "Settings model loaded");

        Self {
            store,
            state,
            store_listener,
        }
    }

    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    pub fn language(&self) -> String {
        self.state.language.get()
    }

    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot {
            namespace: self.store.namespace(),
            path: self.store.path(),
            language: self.language(),
            dark_theme: self.is_dark_theme(),
        }
    }

    /// Any code is accepted; unsupported ones fall back at display time.
    ///
    /// Concurrent calls are applied one at a time. Language observers must not
    /// call `set_language` on the same model from inside their callback.
    pub fn set_language(&self, code: &str) {
        info!(language = %code, "Setting language");
        let code = code.to_string();
        let _write = write_guard(&self.state.language_write);
        self.state.language.replace(code.clone());
        self.store.set_string(KEY_LANGUAGE, &code);
        self.state.language.notify(&code);
    }

    pub fn is_dark_theme(&self) -> bool {
        self.state.dark_theme.get()
    }

    /// Same ordering rules as `set_language`
    pub fn set_dark_theme(&self, is_dark: bool) {
        info!(dark_theme = is_dark, "Setting theme");
        let _write = write_guard(&self.state.dark_theme_write);
        self.state.dark_theme.replace(is_dark);
        self.store.set_bool(KEY_DARK_THEME, is_dark);
        self.state.dark_theme.notify(&is_dark);
    }

    /// `observer` is called now with the current language and after every change
    pub fn subscribe_language<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let id = self.state.language.subscribe(move |code: &String| observer(code.as_str()));
        Subscription {
            setting: Setting::Language,
            id,
        }
    }

    /// `observer` is called now with the current theme and after every change
    pub fn subscribe_theme<F>(&self, observer: F) -> Subscription
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let id = self.state.dark_theme.subscribe(move |dark: &bool| observer(*dark));
        Subscription {
            setting: Setting::DarkTheme,
            id,
        }
    }

    /// Unsubscribing twice is a no-op
    pub fn unsubscribe(&self, subscription: &Subscription) {
        let removed = match subscription.setting {
            Setting::Language => self.state.language.unsubscribe(subscription.id),
            Setting::DarkTheme => self.state.dark_theme.unsubscribe(subscription.id),
        };
        if !removed {
            debug!(subscription = ?subscription, "Subscription already removed");
        }
    }
}

impl Drop for SettingsModel {
    fn drop(&mut self) {
        self.store.unregister_listener(self.store_listener);
    }
}

impl std::fmt::Debug for SettingsModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsModel")
            .field("language", &self.language())
            .field("dark_theme", &self.is_dark_theme())
            .finish()
    }
}
