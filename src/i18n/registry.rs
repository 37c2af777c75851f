//! Language registry: supported languages, text directions and plural categories.
//!
//! The registry is an explicit value passed to whatever needs language data.
//! A built-in instance is available through [`LanguageRegistry::builtin`];
//! deployments with their own language set build one from a [`CatalogConfig`].

use super::message::MessageSource;
use crate::error::{I18nError, Result};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Message category language names are translated under.
pub const LANGUAGE_CATEGORY: &str = "language";

/// Text direction of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ltr => write!(f, "ltr"),
            Direction::Rtl => write!(f, "rtl"),
        }
    }
}

/// Configuration for a supported language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageConfig {
    /// Language code (ISO 639-1, or a locale such as "pt_br")
    pub code: String,

    /// English name of the language (e.g., "French")
    pub name: String,

    /// Text direction
    pub direction: Direction,
}

/// Source for a registry: the language list plus per-language metadata.
///
/// ```json
/// {
///   "languages": { "en": "English", "ar": "Arabic" },
///   "language_directions": { "en": "ltr", "ar": "rtl" },
///   "plural_categories": { "en": ["one", "other"], "ar": ["zero", "one", "two", "few", "many", "other"] }
/// }
/// ```
///
/// `languages` keeps its declared order; it drives the order of every
/// per-language output.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    #[serde(default, deserialize_with = "ordered_pairs")]
    pub languages: Vec<(String, String)>,

    #[serde(default)]
    pub language_directions: HashMap<String, Direction>,

    #[serde(default)]
    pub plural_categories: HashMap<String, Vec<String>>,
}

/// Ordered plural categories per locale.
///
/// Order is significant: it is the order in which encoded plural strings
/// list their entries.
pub trait PluralCatalog {
    /// Plural categories declared for `code`, in canonical order.
    fn plural_categories(&self, code: &str) -> Result<&[String]>;
}

/// Registry of the languages content can be translated into.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    languages: Vec<(String, String)>,
    directions: HashMap<String, Direction>,
    plural_categories: HashMap<String, Vec<String>>,
}

/// Built-in registry instance (initialized lazily)
static BUILTIN: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the built-in registry.
    pub fn builtin() -> &'static LanguageRegistry {
        BUILTIN.get_or_init(|| LanguageRegistry::from_catalog(builtin_catalog()))
    }

    /// Build a registry from catalog configuration.
    ///
    /// No validation happens here; inconsistencies surface from the
    /// operation that needs the missing piece.
    pub fn from_catalog(catalog: CatalogConfig) -> Self {
        Self {
            languages: catalog.languages,
            directions: catalog.language_directions,
            plural_categories: catalog.plural_categories,
        }
    }

    /// Restrict the registry to the given codes, keeping the registry's order.
    ///
    /// # Arguments
    /// * `codes` - Language codes to keep
    ///
    /// # Returns
    /// * `Ok(LanguageRegistry)` with only the given languages
    /// * `Err(I18nError::UnknownLanguage)` for the first code not in the registry
    pub fn restricted_to(&self, codes: &[String]) -> Result<Self> {
        if let Some(unknown) = codes.iter().find(|code| !self.contains(code)) {
            return Err(I18nError::UnknownLanguage(unknown.clone()));
        }
        Ok(Self {
            languages: self
                .languages
                .iter()
                .filter(|(code, _)| codes.contains(code))
                .cloned()
                .collect(),
            directions: self.directions.clone(),
            plural_categories: self.plural_categories.clone(),
        })
    }

    /// All supported languages as ordered `(code, name)` pairs.
    ///
    /// # Returns
    /// * `Ok(&[(code, name)])` in registry order
    /// * `Err(I18nError::NoLanguages)` if no languages are configured
    pub fn language_list(&self) -> Result<&[(String, String)]> {
        if self.languages.is_empty() {
            return Err(I18nError::NoLanguages);
        }
        Ok(&self.languages)
    }

    /// Text directions keyed by language code.
    pub fn language_directions(&self) -> Result<&HashMap<String, Direction>> {
        if self.directions.is_empty() {
            return Err(I18nError::NoLanguageDirections);
        }
        Ok(&self.directions)
    }

    /// Language names translated into `language`, in registry order.
    ///
    /// Each English name is looked up under the `language` message category;
    /// names without a translation are kept as they are.
    ///
    /// # Arguments
    /// * `source` - Translated message lookup
    /// * `language` - Code of the language the names are wanted in
    ///
    /// # Returns
    /// * `Ok(Vec<(code, name)>)` with the translated names
    /// * `Err(I18nError::NoLanguages)` if no languages are configured
    pub fn translated_language_list<S: MessageSource + ?Sized>(
        &self,
        source: &S,
        language: &str,
    ) -> Result<Vec<(String, String)>> {
        Ok(self
            .language_list()?
            .iter()
            .map(|(code, name)| {
                (
                    code.clone(),
                    source.translate(LANGUAGE_CATEGORY, name, language),
                )
            })
            .collect())
    }

    /// All supported languages with their direction.
    ///
    /// # Returns
    /// * `Ok(Vec<LanguageConfig>)` in registry order
    /// * `Err(I18nError::NoLanguageDirections)` if no directions are configured at all
    /// * `Err(I18nError::MissingDirection)` for the first language without a direction
    pub fn language_list_with_direction(&self) -> Result<Vec<LanguageConfig>> {
        let languages = self.language_list()?;
        let directions = self.language_directions()?;

        languages
            .iter()
            .map(|(code, name)| {
                let direction = directions
                    .get(code)
                    .copied()
                    .ok_or_else(|| I18nError::MissingDirection(code.clone()))?;
                Ok(LanguageConfig {
                    code: code.clone(),
                    name: name.clone(),
                    direction,
                })
            })
            .collect()
    }

    /// All supported language codes, in registry order.
    pub fn codes(&self) -> Result<Vec<&str>> {
        Ok(self
            .language_list()?
            .iter()
            .map(|(code, _)| code.as_str())
            .collect())
    }

    /// Name of the language with the given code.
    ///
    /// # Arguments
    /// * `code` - Language code as listed in the registry (e.g., "fr", "pt_br")
    ///
    /// # Returns
    /// * `Ok(&str)` with the configured name
    /// * `Err(I18nError::UnknownLanguage)` if the code is not in the registry
    pub fn name(&self, code: &str) -> Result<&str> {
        self.language_list()?
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, name)| name.as_str())
            .ok_or_else(|| I18nError::UnknownLanguage(code.to_string()))
    }

    /// Check if a language code is in the language list.
    pub fn contains(&self, code: &str) -> bool {
        self.languages.iter().any(|(c, _)| c == code)
    }

    /// Check if a language is written right-to-left.
    ///
    /// # Returns
    /// `true` only if the language has the `rtl` direction configured.
    pub fn is_rtl(&self, code: &str) -> bool {
        self.directions.get(code) == Some(&Direction::Rtl)
    }
}

impl PluralCatalog for LanguageRegistry {
    fn plural_categories(&self, code: &str) -> Result<&[String]> {
        self.plural_categories
            .get(code)
            .map(Vec::as_slice)
            .ok_or_else(|| I18nError::MissingPluralCategories(code.to_string()))
    }
}

/// Deserialize a JSON object into `(key, value)` pairs in document order.
fn ordered_pairs<'de, D>(deserializer: D) -> std::result::Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PairsVisitor;

    impl<'de> Visitor<'de> for PairsVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of language codes to names")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((code, name)) = map.next_entry::<String, String>()? {
                pairs.push((code, name));
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(PairsVisitor)
}

/// Built-in language table.
///
/// Plural categories follow CLDR cardinal rules.
fn builtin_catalog() -> CatalogConfig {
    const TABLE: &[(&str, &str, Direction, &[&str])] = &[
        ("en", "English", Direction::Ltr, &["one", "other"]),
        ("ar", "Arabic", Direction::Rtl, &["zero", "one", "two", "few", "many", "other"]),
        ("bg", "Bulgarian", Direction::Ltr, &["one", "other"]),
        ("ca", "Catalan", Direction::Ltr, &["one", "other"]),
        ("cs", "Czech", Direction::Ltr, &["one", "few", "many", "other"]),
        ("da", "Danish", Direction::Ltr, &["one", "other"]),
        ("de", "German", Direction::Ltr, &["one", "other"]),
        ("en_gb", "UK English", Direction::Ltr, &["one", "other"]),
        ("en_us", "US English", Direction::Ltr, &["one", "other"]),
        ("el", "Greek", Direction::Ltr, &["one", "other"]),
        ("es", "Spanish", Direction::Ltr, &["one", "other"]),
        ("fa", "Persian", Direction::Rtl, &["one", "other"]),
        ("fi", "Finnish", Direction::Ltr, &["one", "other"]),
        ("fil", "Filipino", Direction::Ltr, &["one", "other"]),
        ("fr", "French", Direction::Ltr, &["one", "other"]),
        ("he", "Hebrew", Direction::Rtl, &["one", "two", "other"]),
        ("hi", "Hindi", Direction::Ltr, &["one", "other"]),
        ("hr", "Croatian", Direction::Ltr, &["one", "few", "other"]),
        ("hu", "Hungarian", Direction::Ltr, &["one", "other"]),
        ("id", "Indonesian", Direction::Ltr, &["other"]),
        ("it", "Italian", Direction::Ltr, &["one", "other"]),
        ("ja", "Japanese", Direction::Ltr, &["other"]),
        ("ko", "Korean", Direction::Ltr, &["other"]),
        ("lt", "Lithuanian", Direction::Ltr, &["one", "few", "many", "other"]),
        ("lv", "Latvian", Direction::Ltr, &["zero", "one", "other"]),
        ("nl", "Dutch", Direction::Ltr, &["one", "other"]),
        ("no", "Norwegian", Direction::Ltr, &["one", "other"]),
        ("pl", "Polish", Direction::Ltr, &["one", "few", "many", "other"]),
        ("pt", "Portuguese", Direction::Ltr, &["one", "other"]),
        ("pt_br", "Portuguese (Brasil)", Direction::Ltr, &["one", "other"]),
        ("pt_pt", "Portuguese (Portugal)", Direction::Ltr, &["one", "other"]),
        ("ro", "Romanian", Direction::Ltr, &["one", "few", "other"]),
        ("ru", "Russian", Direction::Ltr, &["one", "few", "many", "other"]),
        ("sk", "Slovak", Direction::Ltr, &["one", "few", "many", "other"]),
        ("sl", "Slovene", Direction::Ltr, &["one", "two", "few", "other"]),
        ("sr", "Serbian", Direction::Ltr, &["one", "few", "other"]),
        ("sv", "Swedish", Direction::Ltr, &["one", "other"]),
        ("th", "Thai", Direction::Ltr, &["other"]),
        ("tr", "Turkish", Direction::Ltr, &["one", "other"]),
        ("uk", "Ukrainian", Direction::Ltr, &["one", "few", "many", "other"]),
        ("vi", "Vietnamese", Direction::Ltr, &["other"]),
        ("zh", "Chinese", Direction::Ltr, &["other"]),
        ("zh_cn", "Chinese (PRC)", Direction::Ltr, &["other"]),
        ("zh_tw", "Chinese (Taiwan & Hong Kong)", Direction::Ltr, &["other"]),
    ];

    let mut catalog = CatalogConfig::default();
    for (code, name, direction, categories) in TABLE {
        catalog.languages.push((code.to_string(), name.to_string()));
        catalog.language_directions.insert(code.to_string(), *direction);
        catalog.plural_categories.insert(
            code.to_string(),
            categories.iter().map(|c| c.to_string()).collect(),
        );
    }
    catalog
}
