use std::sync::{Arc, Mutex};

use lang_settings::locale::{StringId, apply_saved_language, default_locale};
use lang_settings::{DisplayContext, Language, PreferenceStore, SettingsModel, apply_language};

#[test]
fn test_language_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let model = SettingsModel::new(PreferenceStore::open(dir.path(), "settings"));
        assert_eq!(model.language(), "en");
        assert!(!model.is_dark_theme());

        model.set_language("de");
        assert_eq!(model.language(), "de");
    }

    // Every handle is gone, so this is a fresh read of the file
    let model = SettingsModel::new(PreferenceStore::open(dir.path(), "settings"));
    assert_eq!(model.language(), "de");
    assert!(!model.is_dark_theme());
}

#[test]
fn test_models_on_same_namespace_converge() {
    let dir = tempfile::tempdir().unwrap();
    let a = SettingsModel::new(PreferenceStore::open(dir.path(), "settings"));
    let b = SettingsModel::new(PreferenceStore::open(dir.path(), "settings"));

    let b_themes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&b_themes);
    let sub = b.subscribe_theme(move |dark| sink.lock().unwrap().push(dark));

    a.set_dark_theme(true);
    assert!(b.is_dark_theme());
    assert_eq!(*b_themes.lock().unwrap(), vec![false, true]);

    b.unsubscribe(&sub);
    a.set_dark_theme(false);
    assert!(!b.is_dark_theme());
    assert_eq!(*b_themes.lock().unwrap(), vec![false, true]);
}

#[test]
fn test_startup_applies_saved_language() {
    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceStore::open(dir.path(), "settings");
    SettingsModel::new(store.clone()).set_language("es");

    let display = apply_saved_language(&DisplayContext::default(), &store);
    assert_eq!(display.language(), Language::Spanish);
    assert_eq!(display.text(StringId::HelloWorld), "¡Hola Mundo!");
    assert_eq!(default_locale().language(), Language::Spanish);

    // Re-applying the same code changes nothing observable
    let again = apply_language(&display, "es");
    assert_eq!(again, display);
}
