//! Languages for the study-medium and job language pickers / 语言列表

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::directory::{Directory, Filter, Record, ResultSet, SortOrder};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    /// ISO 639-1 code / 语言代码
    pub code: String,
    pub name: String,
    pub native_name: String,
    pub flag: String,
}

impl Record for Language {
    type Id = String;

    fn id(&self) -> String {
        self.code.clone()
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.native_name, &self.code]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LanguageQuery {
    pub search: Option<String>,
}

fn language(code: &str, name: &str, native_name: &str, flag: &str) -> Language {
    Language {
        code: code.to_string(),
        name: name.to_string(),
        native_name: native_name.to_string(),
        flag: flag.to_string(),
    }
}

pub static LANGUAGES: Lazy<Directory<Language>> = Lazy::new(|| {
    Directory::new(
        "languages",
        vec![
            language("en", "English", "English", "🇬🇧"),
            language("ru", "Russian", "Русский", "🇷🇺"),
            language("bn", "Bengali", "বাংলা", "🇧🇩"),
            language("hi", "Hindi", "हिन्दी", "🇮🇳"),
            language("ur", "Urdu", "اردو", "🇵🇰"),
            language("ar", "Arabic", "العربية", "🇸🇦"),
            language("fr", "French", "Français", "🇫🇷"),
            language("de", "German", "Deutsch", "🇩🇪"),
            language("es", "Spanish", "Español", "🇪🇸"),
            language("zh", "Chinese", "中文", "🇨🇳"),
            language("tr", "Turkish", "Türkçe", "🇹🇷"),
            language("fa", "Persian", "فارسی", "🇮🇷"),
            language("uz", "Uzbek", "Oʻzbekcha", "🇺🇿"),
            language("kk", "Kazakh", "Қазақша", "🇰🇿"),
            language("tt", "Tatar", "Татарча", "🇷🇺"),
            language("ne", "Nepali", "नेपाली", "🇳🇵"),
            language("pt", "Portuguese", "Português", "🇵🇹"),
            language("sw", "Swahili", "Kiswahili", "🇰🇪"),
        ],
        SortOrder::ByName,
    )
});

pub fn search(query: &LanguageQuery) -> ResultSet<&'static Language> {
    LANGUAGES.query(&Filter::new(), super::search_text(&query.search))
}

/// Resolve a code picked in a form / 按代码查找语言
pub fn by_code(code: &str) -> Option<&'static Language> {
    LANGUAGES.get(&code.trim().to_lowercase())
}
