//! Language labels, as written on the nomenclature pages.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::model::Language;

lazy_static! {
    static ref LANGUAGES: HashMap<&'static str, Language> = HashMap::from([
        ("english", Language::En),
        ("french", Language::Fr),
        ("français", Language::Fr),
        ("german", Language::De),
        ("deutsch", Language::De),
        ("spanish", Language::Es),
        ("español", Language::Es),
    ]);
}

/// A label that no lookup table knows about.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported {field} '{value}'")]
pub struct UnsupportedValue {
    pub field: &'static str,
    pub value: String,
}

impl UnsupportedValue {
    pub fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// Maps an English or native language name to its code, ignoring case.
pub fn parse_language(label: &str) -> Result<Language, UnsupportedValue> {
    let key = label.trim().to_lowercase();
    LANGUAGES
        .get(key.as_str())
        .copied()
        .ok_or_else(|| UnsupportedValue::new("language", label))
}
