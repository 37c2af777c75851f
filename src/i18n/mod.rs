//! Language data and the pluralized message codec.
//!
//! # Architecture
//!
//! - `registry`: supported languages, their directions and plural categories
//! - `message`: the translated message lookup used for names and catalogs
//! - `plural`: encoding/decoding of plural message sets (`one#..|other#..`)
//!
//! # Example
//!
//! ```rust
//! use content_i18n::i18n::{plural, LanguageRegistry, PluralMessageSet};
//!
//! let registry = LanguageRegistry::builtin();
//! let messages = PluralMessageSet::new()
//!     .with("one", "1 apple")
//!     .with("other", "%d apples");
//!
//! let encoded = plural::encode(&messages, "en", registry)?;
//! assert_eq!(encoded, "one#1 apple|other#%d apples");
//! assert_eq!(plural::decode(&encoded, "en", registry)?, messages);
//! # Ok::<(), content_i18n::I18nError>(())
//! ```

mod message;
pub mod plural;
mod registry;

pub use message::MessageSource;
pub use plural::{PluralMessageSet, FALLBACK_CATEGORY};
pub use registry::{
    CatalogConfig, Direction, LanguageConfig, LanguageRegistry, PluralCatalog, LANGUAGE_CATEGORY,
};
