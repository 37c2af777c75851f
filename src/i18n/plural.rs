//! Pluralized message codec.
//!
//! A plural message set maps each plural category of a locale to a message.
//! On the wire it is a single string:
//!
//! ```text
//! one#1 apple|other#%d apples
//! ```
//!
//! Entries are `category#text`, joined with `|`, listed in the locale's
//! canonical category order. There is no escaping: categories must not
//! contain `#` or `|`, and texts must not contain `|`.

use crate::error::{I18nError, Result};
use crate::i18n::PluralCatalog;
use regex::Regex;
use std::sync::OnceLock;
use tracing::trace;

/// Category used as the fallback when a locale's category is missing.
pub const FALLBACK_CATEGORY: &str = "true";

// Entry pattern: category (no '#' or '|'), '#', text (no '|'), terminated by '|'
static ENTRY_REGEX: OnceLock<Regex> = OnceLock::new();

fn entry_regex() -> &'static Regex {
    ENTRY_REGEX.get_or_init(|| Regex::new(r"\s*([^#|]*)#([^|]*)\|").unwrap())
}

/// Messages keyed by plural category.
///
/// Entries keep insertion order (decoded sets are in locale order), but
/// equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct PluralMessageSet {
    entries: Vec<(String, Option<String>)>,
}

impl PluralMessageSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from positional forms, assigned to the locale's categories in order.
    ///
    /// Forms beyond the locale's category count are dropped; categories
    /// beyond the number of forms are absent.
    ///
    /// # Arguments
    /// * `forms` - Messages in the locale's category order
    /// * `locale` - Language code whose categories the forms are assigned to
    /// * `catalog` - Source of the locale's plural categories
    ///
    /// # Returns
    /// * `Ok(PluralMessageSet)` with one entry per assigned form
    /// * `Err(I18nError::MissingPluralCategories)` if the catalog has no entry for `locale`
    pub fn from_forms<S: AsRef<str>>(
        forms: &[S],
        locale: &str,
        catalog: &impl PluralCatalog,
    ) -> Result<Self> {
        let categories = catalog.plural_categories(locale)?;
        let mut set = Self::new();
        for (category, form) in categories.iter().zip(forms) {
            set.insert(category.clone(), Some(form.as_ref().to_string()));
        }
        Ok(set)
    }

    /// Set the message for a category, replacing any previous value.
    pub fn insert(&mut self, category: impl Into<String>, message: Option<String>) {
        let category = category.into();
        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some(entry) => entry.1 = message,
            None => self.entries.push((category, message)),
        }
    }

    /// Builder-style [`insert`](Self::insert) for a present message.
    pub fn with(mut self, category: impl Into<String>, message: impl Into<String>) -> Self {
        self.insert(category, Some(message.into()));
        self
    }

    /// Message for a category.
    ///
    /// `None` both when the category is not in the set and when it is
    /// present without a message; use [`contains`](Self::contains) to tell them apart.
    pub fn get(&self, category: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .and_then(|(_, message)| message.as_deref())
    }

    /// Check if the category is represented in the set.
    pub fn contains(&self, category: &str) -> bool {
        self.entries.iter().any(|(c, _)| c == category)
    }

    /// Message for a category, substituting the `true` category's message when absent.
    ///
    /// Used when source and target locales disagree on their categories.
    /// A set without a `true` category cannot fall back, which is a
    /// configuration error for that locale.
    ///
    /// # Returns
    /// * `Ok(Some(_))` with the category's message, or the `true` message when it is absent
    /// * `Ok(None)` if the fallback exists but has no message
    /// * `Err(I18nError::MissingFallbackCategory)` if the category is absent and there is no `true` category
    pub fn get_or_fallback(&self, category: &str) -> Result<Option<&str>> {
        if let Some(message) = self.get(category) {
            return Ok(Some(message));
        }
        if !self.contains(FALLBACK_CATEGORY) {
            return Err(I18nError::MissingFallbackCategory {
                category: category.to_string(),
            });
        }
        Ok(self.get(FALLBACK_CATEGORY))
    }

    /// Iterate over `(category, message)` entries in set order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(category, message)| (category.as_str(), message.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for PluralMessageSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.entries.iter().all(|(category, message)| {
                other
                    .entries
                    .iter()
                    .any(|(c, m)| c == category && m == message)
            })
    }
}

impl Eq for PluralMessageSet {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PluralMessageSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (category, message) in iter {
            set.insert(category, Some(message.into()));
        }
        set
    }
}

/// Encode a message set for a locale.
///
/// Emits one `category#text` entry per category the locale declares, in
/// the locale's order; categories without a message emit `category#`.
/// Categories the locale does not declare are not emitted. An empty set
/// encodes to an empty string.
///
/// # Arguments
/// * `messages` - The messages to encode
/// * `locale` - Language code whose categories and order are used
/// * `catalog` - Source of the locale's plural categories
///
/// # Returns
/// * `Ok(String)` with the encoded entries
/// * `Err(I18nError::MissingPluralCategories)` if the catalog has no entry for `locale`,
///   even for an empty set
pub fn encode(
    messages: &PluralMessageSet,
    locale: &str,
    catalog: &impl PluralCatalog,
) -> Result<String> {
    let categories = catalog.plural_categories(locale)?;
    if messages.is_empty() {
        return Ok(String::new());
    }

    let encoded = categories
        .iter()
        .map(|category| format!("{}#{}", category, messages.get(category).unwrap_or("")))
        .collect::<Vec<_>>()
        .join("|");

    Ok(encoded)
}

/// Decode an encoded plural string for a locale.
///
/// Every category the locale declares is present in the result; categories
/// with no entry in the string are absent (`None`). When a category occurs
/// more than once, the last occurrence wins. Unknown categories and
/// fragments that do not form an entry are dropped.
///
/// # Arguments
/// * `encoded` - A `category#text|category#text` string
/// * `locale` - Language code whose categories are extracted
/// * `catalog` - Source of the locale's plural categories
///
/// # Returns
/// * `Ok(PluralMessageSet)` holding exactly the locale's categories
/// * `Err(I18nError::MissingPluralCategories)` if the catalog has no entry for `locale`
pub fn decode(
    encoded: &str,
    locale: &str,
    catalog: &impl PluralCatalog,
) -> Result<PluralMessageSet> {
    let categories = catalog.plural_categories(locale)?;

    let terminated = format!("{}|", encoded);
    let pairs: Vec<(&str, &str)> = entry_regex()
        .captures_iter(&terminated)
        .filter_map(|cap| Some((cap.get(1)?.as_str(), cap.get(2)?.as_str())))
        .collect();

    trace!(locale, entries = pairs.len(), "Decoded plural entries");

    let mut set = PluralMessageSet::new();
    for category in categories {
        let message = pairs
            .iter()
            .rev()
            .find(|(c, _)| c == category)
            .map(|(_, message)| message.to_string());
        set.insert(category.clone(), message);
    }

    Ok(set)
}
