//! Translatable items: attribute resolution and translation workflow rules.
//!
//! # Architecture
//!
//! - `item`: the read-only item view and its declarative translation configuration
//! - `attributes`: which attributes are translatable, and which currently are
//! - `relations`: per-language names of multilingual relations
//! - `rules`: validation rules for the per-language and per-step scenarios
//! - `po`: translation of PO-JSON message catalogs stored on items
//!
//! # Example
//!
//! ```rust
//! use content_i18n::i18n::LanguageRegistry;
//! use content_i18n::translatable::{
//!     ColumnsConfig, I18nRuleSynthesizer, ItemSnapshot, TranslationBehaviors, WorkflowStep,
//! };
//!
//! let item = ItemSnapshot::new("chapter", "en")
//!     .with_behaviors(TranslationBehaviors {
//!         attribute_messages: None,
//!         columns: Some(ColumnsConfig {
//!             translation_attributes: vec!["title".to_string()],
//!             multilingual_relations: Vec::new(),
//!         }),
//!     })
//!     .with_step(WorkflowStep::new("info", ["title_en"]))
//!     .with_attribute("title_en", serde_json::json!("Hello"));
//!
//! let registry = LanguageRegistry::builtin();
//! let rules = I18nRuleSynthesizer::new(registry).i18n_rules(&item)?;
//! assert_eq!(rules.len(), 2 * registry.codes()?.len());
//! # Ok::<(), content_i18n::I18nError>(())
//! ```

mod attributes;
mod item;
pub mod po;
pub mod relations;
mod rules;

pub use attributes::{AttributeKind, AttributeResolver, TranslatableAttribute};
pub use item::{
    AttributeMessagesConfig, ColumnsConfig, ItemSnapshot, RecursivelyTranslatable,
    TranslatableItem, TranslationBehaviors, ValidatorRef, WorkflowStep,
};
pub use po::{translate_po_json_messages, translation_category, MessageSource};
pub use relations::{multilingual_relations, MultilingualRelation, MultilingualRelations};
pub use rules::{I18nRule, I18nRuleSynthesizer, RuleValidator, Scenario, ZERO_PROGRESS_COMPARE_VALUE};
