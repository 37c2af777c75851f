//! Error types for configuration problems in the language catalog.
//!
//! Only configuration errors are represented here. Missing translation
//! metadata (unregistered recursive attributes, unconfigured mechanisms,
//! unset attributes) is never an error and resolves to empty results.

use thiserror::Error;

/// Fatal configuration error surfaced by the i18n core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum I18nError {
    /// The language list is empty or was never configured.
    #[error("No languages defined in the language catalog")]
    NoLanguages,

    /// No language directions were configured at all.
    #[error("No language directions defined in the language catalog")]
    NoLanguageDirections,

    /// A language is listed without a text direction.
    #[error("No language direction defined for \"{0}\"")]
    MissingDirection(String),

    /// A language code was requested that the catalog does not know.
    #[error("Failed to find language for code \"{0}\"")]
    UnknownLanguage(String),

    /// No plural categories are configured for a locale.
    #[error("No plural categories defined for locale \"{0}\"")]
    MissingPluralCategories(String),

    /// A plural category is missing and the set has no `true` category to fall back to.
    #[error("Plural category \"{category}\" is missing and no \"true\" fallback category exists")]
    MissingFallbackCategory { category: String },
}

pub type Result<T> = std::result::Result<T, I18nError>;
