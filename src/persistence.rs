//! Preference store: a named, flat key-value namespace persisted as JSON
//!
//! Every namespace lives in `<dir>/<name>.json`. Opening the same file twice in
//! one process hands out handles onto the same in-memory map, so a write made
//! through one handle is visible to every other handle as soon as it returns.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, error, info, warn};

use crate::constants::{config, prefs};

/// Handle returned by [`PreferenceStore::register_listener`]
pub type ListenerId = u64;

/// Called after every write with the store and the key that changed
type Listener = Arc<dyn Fn(&PreferenceStore, &str) + Send + Sync>;

/// Open file-backed namespaces, keyed by their backing path.
/// Weak so that a namespace nobody holds is re-read from disk on next open.
static OPEN_NAMESPACES: LazyLock<Mutex<HashMap<PathBuf, Weak<Mutex<Namespace>>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

struct Namespace {
    name: String,
    /// None for in-memory namespaces
    path: Option<PathBuf>,
    values: Map<String, Value>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: ListenerId,
}

impl Namespace {
    fn flush(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create preference directory {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(&self.values)
            .context("Failed to serialize preferences to JSON")?;

        // Write next to the target and rename so a crash never leaves half a file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents)
            .with_context(|| format!("Failed to write preferences to {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to replace preference file {}", path.display()))?;
        Ok(())
    }
}

/// Cloneable handle onto a shared preference namespace
#[derive(Clone)]
pub struct PreferenceStore {
    inner: Arc<Mutex<Namespace>>,
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ns = self.lock();
        f.debug_struct("PreferenceStore")
            .field("name", &ns.name)
            .field("path", &ns.path)
            .field("keys", &ns.values.len())
            .finish()
    }
}

/// Resolve the directory holding preference files
/// Priority: explicit override > LANG_SETTINGS_DIR > platform config dir > cwd
pub fn preferences_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    if let Ok(dir) = env::var(config::DIR_ENV_VAR)
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(config::APP_DIR);
    path
}

impl PreferenceStore {
    /// Open (or join) the namespace `name` stored under `dir`
    ///
    /// A missing file is an empty namespace. An unreadable or corrupt file is
    /// logged and also treated as empty; the next write replaces it.
    pub fn open(dir: &Path, name: &str) -> Self {
        let path = dir.join(format!("{name}.{}", prefs::FILE_EXTENSION));
        let mut open = OPEN_NAMESPACES.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(inner) = open.get(&path).and_then(Weak::upgrade) {
            debug!(namespace = %name, path = %path.display(), "Joining open preference namespace");
            return Self { inner };
        }

        let values = match read_namespace_file(&path) {
            Ok(Some(values)) => {
                info!(namespace = %name, path = %path.display(), keys = values.len(), "Loaded preferences");
                values
            }
            Ok(None) => {
                info!(namespace = %name, path = %path.display(), "No preference file yet, starting empty");
                Map::new()
            }
            Err(e) => {
                error!(namespace = %name, path = %path.display(), error = ?e, "Failed to load preferences, starting empty");
                Map::new()
            }
        };

        let inner = Arc::new(Mutex::new(Namespace {
            name: name.to_string(),
            path: Some(path.clone()),
            values,
            listeners: Vec::new(),
            next_listener: 0,
        }));
        open.retain(|_, ns| ns.strong_count() > 0);
        open.insert(path, Arc::downgrade(&inner));
        Self { inner }
    }

    /// Namespace that never touches disk
    pub fn in_memory(name: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Namespace {
                name: name.to_string(),
                path: None,
                values: Map::new(),
                listeners: Vec::new(),
                next_listener: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Namespace> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn namespace(&self) -> String {
        self.lock().name.clone()
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<PathBuf> {
        self.lock().path.clone()
    }

    /// True if both handles point at the same namespace
    pub fn same_namespace(&self, other: &PreferenceStore) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().values.contains_key(key)
    }

    /// Stored string for `key`, or `default` when absent or not a string
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.lock()
            .values
            .get(key)
            .and_then(Value::as_str)
            .map_or_else(|| default.to_string(), str::to_string)
    }

    /// Stored boolean for `key`, or `default` when absent or not a boolean
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.lock()
            .values
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    pub fn set_string(&self, key: &str, value: &str) {
        self.write(key, Some(Value::String(value.to_string())));
    }

    pub fn set_bool(&self, key: &str, value: bool) {
        self.write(key, Some(Value::Bool(value)));
    }

    /// Drop `key`; later reads fall back to their defaults
    pub fn remove(&self, key: &str) {
        self.write(key, None);
    }

    /// Update the map, flush it and then run the listeners outside the lock
    fn write(&self, key: &str, value: Option<Value>) {
        let listeners: Vec<Listener> = {
            let mut ns = self.lock();
            match value {
                Some(value) => {
                    debug!(namespace = %ns.name, key = %key, value = %value, "Writing preference");
                    ns.values.insert(key.to_string(), value);
                }
                None => {
                    if ns.values.remove(key).is_none() {
                        return;
                    }
                    debug!(namespace = %ns.name, key = %key, "Removed preference");
                }
            }
            // The in-memory value stays authoritative for this process even if disk fails
            if let Err(e) = ns.flush() {
                error!(namespace = %ns.name, key = %key, error = ?e, "Failed to persist preference");
            }
            ns.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };

        for listener in listeners {
            listener(self, key);
        }
    }

    /// Register a callback run synchronously after every write to this namespace
    pub fn register_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&PreferenceStore, &str) + Send + Sync + 'static,
    {
        let mut ns = self.lock();
        let id = ns.next_listener;
        ns.next_listener += 1;
        ns.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Returns false if the listener was already gone
    pub fn unregister_listener(&self, id: ListenerId) -> bool {
        let mut ns = self.lock();
        let before = ns.listeners.len();
        ns.listeners.retain(|(lid, _)| *lid != id);
        let removed = ns.listeners.len() != before;
        if !removed {
            warn!(namespace = %ns.name, listener = id, "Listener already unregistered");
        }
        removed
    }
}

/// Ok(None) when the file does not exist
fn read_namespace_file(path: &Path) -> Result<Option<Map<String, Value>>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read preferences from {}", path.display()))?;
    if contents.trim().is_empty() {
        return Ok(Some(Map::new()));
    }
    let values = serde_json::from_str::<Map<String, Value>>(&contents)
        .with_context(|| format!("Failed to parse preferences JSON from {}", path.display()))?;
    Ok(Some(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_missing_keys_return_defaults() {
        let store = PreferenceStore::in_memory("settings");
        assert_eq!(store.get_string("language", "en"), "en");
        assert!(!store.get_bool("dark_theme", false));
        assert!(store.get_bool("dark_theme", true));
    }

    #[test]
    fn test_set_then_get() {
        let store = PreferenceStore::in_memory("settings");
        store.set_string("language", "fr");
        store.set_bool("dark_theme", true);
        assert_eq!(store.get_string("language", "en"), "fr");
        assert!(store.get_bool("dark_theme", false));
    }

    #[test]
    fn test_wrong_type_falls_back_to_default() {
        let store = PreferenceStore::in_memory("settings");
        store.set_bool("language", true);
        store.set_string("dark_theme", "yes");
        assert_eq!(store.get_string("language", "en"), "en");
        assert!(!store.get_bool("dark_theme", false));
    }

    #[test]
    fn test_remove_restores_default() {
        let store = PreferenceStore::in_memory("settings");
        store.set_string("language", "de");
        assert!(store.contains("language"));
        store.remove("language");
        assert!(!store.contains("language"));
        assert_eq!(store.get_string("language", "en"), "en");
    }

    #[test]
    fn test_values_survive_reopen_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = PreferenceStore::open(dir.path(), "settings");
            store.set_string("language", "es");
            store.set_bool("dark_theme", true);
        }
        // All handles dropped, so this re-reads the file
        let store = PreferenceStore::open(dir.path(), "settings");
        assert_eq!(store.get_string("language", "en"), "es");
        assert!(store.get_bool("dark_theme", false));

        let written = fs::read_to_string(dir.path().join("settings.json")).unwrap();
        let json: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json["language"], "es");
        assert_eq!(json["dark_theme"], true);
    }

    #[test]
    fn test_open_same_namespace_shares_state() {
        let dir = tempfile::tempdir().unwrap();
        let a = PreferenceStore::open(dir.path(), "settings");
        let b = PreferenceStore::open(dir.path(), "settings");
        assert!(a.same_namespace(&b));

        a.set_bool("dark_theme", true);
        assert!(b.get_bool("dark_theme", false));
    }

    #[test]
    fn test_different_namespaces_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let settings = PreferenceStore::open(dir.path(), "settings");
        let other = PreferenceStore::open(dir.path(), "other");
        assert!(!settings.same_namespace(&other));

        settings.set_string("language", "de");
        assert_eq!(other.get_string("language", "en"), "en");
    }

    #[test]
    fn test_corrupt_file_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("settings.json"), "{ not json").unwrap();

        let store = PreferenceStore::open(dir.path(), "settings");
        assert_eq!(store.get_string("language", "en"), "en");

        // Next write replaces the broken file
        store.set_string("language", "fr");
        let written = fs::read_to_string(dir.path().join("settings.json")).unwrap();
        assert!(written.contains("\"fr\""));
    }

    #[test]
    fn test_listeners_run_after_write() {
        let store = PreferenceStore::in_memory("settings");
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let id = {
            let calls = Arc::clone(&calls);
            let seen = Arc::clone(&seen);
            store.register_listener(move |store, key| {
                calls.fetch_add(1, Ordering::SeqCst);
                // Value is already readable when the listener runs
                seen.lock().unwrap().push((key.to_string(), store.get_string(key, "")));
            })
        };

        store.set_string("language", "de");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(seen.lock().unwrap()[0], ("language".to_string(), "de".to_string()));

        assert!(store.unregister_listener(id));
        assert!(!store.unregister_listener(id));
        store.set_string("language", "fr");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_remove_missing_key_does_not_notify() {
        let store = PreferenceStore::in_memory("settings");
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        store.register_listener(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.remove("language");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_preferences_dir_override_wins() {
        let dir = PathBuf::from("/tmp/somewhere");
        assert_eq!(preferences_dir(Some(&dir)), dir);
    }
}
