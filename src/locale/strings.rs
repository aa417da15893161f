//! Bundled UI strings, one table per supported language

use super::Language;

/// Identifier of a translatable UI string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringId {
    AppTitle,
    HelloWorld,
    ChangeLanguage,
    SelectLanguage,
    SelectedLanguage,
    SelectTheme,
    SelectedTheme,
    DarkTheme,
    LightTheme,
    English,
    Spanish,
    French,
    German,
    Back,
}

impl StringId {
    pub const ALL: [StringId; 14] = [
        StringId::AppTitle,
        StringId::HelloWorld,
        StringId::ChangeLanguage,
        StringId::SelectLanguage,
        StringId::SelectedLanguage,
        StringId::SelectTheme,
        StringId::SelectedTheme,
        StringId::DarkTheme,
        StringId::LightTheme,
        StringId::English,
        StringId::Spanish,
        StringId::French,
        StringId::German,
        StringId::Back,
    ];
}

pub fn lookup(language: Language, id: StringId) -> &'static str {
    match language {
        Language::English => english(id),
        Language::Spanish => spanish(id),
        Language::French => french(id),
        Language::German => german(id),
    }
}

fn english(id: StringId) -> &'static str {
    match id {
        StringId::AppTitle => "Language & Theme",
        StringId::HelloWorld => "Hello World!",
        StringId::ChangeLanguage => "Change language",
        StringId::SelectLanguage => "Select language",
        StringId::SelectedLanguage => "Selected language",
        StringId::SelectTheme => "Select theme",
        StringId::SelectedTheme => "Selected theme",
        StringId::DarkTheme => "Dark",
        StringId::LightTheme => "Light",
        StringId::English => "English",
        StringId::Spanish => "Spanish",
        StringId::French => "French",
        StringId::German => "German",
        StringId::Back => "Back",
    }
}

fn spanish(id: StringId) -> &'static str {
    match id {
        StringId::AppTitle => "Idioma y tema",
        StringId::HelloWorld => "¡Hola Mundo!",
        StringId::ChangeLanguage => "Cambiar idioma",
        StringId::SelectLanguage => "Seleccionar idioma",
        StringId::SelectedLanguage => "Idioma seleccionado",
        StringId::SelectTheme => "Seleccionar tema",
        StringId::SelectedTheme => "Tema seleccionado",
        StringId::DarkTheme => "Oscuro",
        StringId::LightTheme => "Claro",
        StringId::English => "Inglés",
        StringId::Spanish => "Español",
        StringId::French => "Francés",
        StringId::German => "Alemán",
        StringId::Back => "Volver",
    }
}

fn french(id: StringId) -> &'static str {
    match id {
        StringId::AppTitle => "Langue et thème",
        StringId::HelloWorld => "Bonjour le monde !",
        StringId::ChangeLanguage => "Changer de langue",
        StringId::SelectLanguage => "Choisir la langue",
        StringId::SelectedLanguage => "Langue sélectionnée",
        StringId::SelectTheme => "Choisir le thème",
        StringId::SelectedTheme => "Thème sélectionné",
        StringId::DarkTheme => "Sombre",
        StringId::LightTheme => "Clair",
        StringId::English => "Anglais",
        StringId::Spanish => "Espagnol",
        StringId::French => "Français",
        StringId::German => "Allemand",
        StringId::Back => "Retour",
    }
}

fn german(id: StringId) -> &'static str {
    match id {
        StringId::AppTitle => "Sprache und Design",
        StringId::HelloWorld => "Hallo Welt!",
        StringId::ChangeLanguage => "Sprache ändern",
        StringId::SelectLanguage => "Sprache auswählen",
        StringId::SelectedLanguage => "Ausgewählte Sprache",
        StringId::SelectTheme => "Design auswählen",
        StringId::SelectedTheme => "Ausgewähltes Design",
        StringId::DarkTheme => "Dunkel",
        StringId::LightTheme => "Hell",
        StringId::English => "Englisch",
        StringId::Spanish => "Spanisch",
        StringId::French => "Französisch",
        StringId::German => "Deutsch",
        StringId::Back => "Zurück",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_string_translated() {
        for language in Language::ALL {
            for id in StringId::ALL {
                assert!(!lookup(language, id).is_empty(), "{language:?} missing {id:?}");
            }
        }
    }

    #[test]
    fn test_tables_differ_per_language() {
        assert_eq!(lookup(Language::English, StringId::HelloWorld), "Hello World!");
        assert_eq!(lookup(Language::Spanish, StringId::HelloWorld), "¡Hola Mundo!");
        assert_ne!(
            lookup(Language::French, StringId::ChangeLanguage),
            lookup(Language::German, StringId::ChangeLanguage)
        );
    }
}
