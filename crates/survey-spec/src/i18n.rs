use std::collections::BTreeMap;
use std::sync::OnceLock;

use thiserror::Error;
use unic_langid::LanguageIdentifier;

/// Locales with an embedded message catalog.
pub const SUPPORTED_LOCALES: &[&str] = &["en", "mn"];

static EN_MESSAGES: OnceLock<BTreeMap<String, String>> = OnceLock::new();
static MN_MESSAGES: OnceLock<BTreeMap<String, String>> = OnceLock::new();

fn en_messages() -> &'static BTreeMap<String, String> {
    EN_MESSAGES.get_or_init(|| {
        serde_json::from_str(include_str!("../i18n/en.json"))
            .expect("parse embedded i18n/en.json catalog")
    })
}

fn mn_messages() -> &'static BTreeMap<String, String> {
    MN_MESSAGES.get_or_init(|| {
        serde_json::from_str(include_str!("../i18n/mn.json"))
            .expect("parse embedded i18n/mn.json catalog")
    })
}

fn embedded(locale: &str) -> Option<&'static BTreeMap<String, String>> {
    match locale {
        "en" => Some(en_messages()),
        "mn" => Some(mn_messages()),
        _ => None,
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse message catalog for '{locale}'")]
    Parse {
        locale: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Localized messages for validation and previews. Keys missing from the
/// selected locale fall back to English, then to the key itself.
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: String,
    messages: BTreeMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::english()
    }
}

impl Catalog {
    pub fn english() -> Self {
        Self {
            locale: "en".into(),
            messages: en_messages().clone(),
        }
    }

    /// Picks the embedded catalog for `locale` (`mn-MN` resolves to `mn`).
    /// Unsupported locales get English.
    pub fn for_locale(locale: &str) -> Self {
        let Some(supported) = supported_locale(locale) else {
            return Self::english();
        };
        match embedded(supported) {
            Some(messages) => Self {
                locale: supported.to_string(),
                messages: messages.clone(),
            },
            None => Self::english(),
        }
    }

    /// Loads a flat `key -> message` JSON catalog, layering it over the
    /// embedded catalog for the same locale.
    pub fn from_json(locale: &str, raw: &str) -> Result<Self, CatalogError> {
        let overrides: BTreeMap<String, String> =
            serde_json::from_str(raw).map_err(|source| CatalogError::Parse {
                locale: locale.to_string(),
                source,
            })?;
        let mut catalog = Self::for_locale(locale);
        if let Some(lid) = normalize_locale(locale) {
            catalog.locale = lid.language.to_string();
        }
        catalog.messages.extend(overrides);
        Ok(catalog)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn message(&self, key: &str) -> String {
        self.messages
            .get(key)
            .or_else(|| en_messages().get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Resolves `key` and substitutes `{name}` placeholders.
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut output = self.message(key);
        for (name, value) in args {
            output = output.replace(&format!("{{{name}}}"), value);
        }
        output
    }

    /// English keys this catalog has no translation for.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        en_messages()
            .keys()
            .filter(|key| !self.messages.contains_key(key.as_str()))
            .map(String::as_str)
            .collect()
    }
}

/// Parses POSIX (`mn_MN.UTF-8@latin`) or BCP 47 (`mn-MN`) input.
pub fn normalize_locale(raw: &str) -> Option<LanguageIdentifier> {
    let tag = raw.trim().split(['.', '@']).next()?.replace('_', "-");
    if tag.is_empty() {
        return None;
    }
    tag.parse::<LanguageIdentifier>().ok()
}

/// The shipped catalog whose language matches `raw`, if any.
pub fn supported_locale(raw: &str) -> Option<&'static str> {
    let language = normalize_locale(raw)?.language.to_string();
    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|supported| *supported == language)
}
