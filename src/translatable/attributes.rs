//! Translatable attribute resolution.
//!
//! An item's translatable attributes come from two places: the translation
//! mechanisms configured in [`TranslationBehaviors`](super::TranslationBehaviors)
//! (direct attributes) and the item's [`RecursivelyTranslatable`](super::RecursivelyTranslatable)
//! capability (recursive attributes). An attribute is *currently* translatable
//! when its source content is present.

use super::item::{TranslatableItem, ValidatorRef};
use super::relations;
use serde_json::Value;
use std::cell::OnceCell;
use tracing::debug;

/// How an attribute's translations are stored and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeKind {
    /// The translated value is stored per language on the item.
    Direct,
    /// The content is translated by a nested mechanism and checked by a validator method.
    Recursive(ValidatorRef),
}

/// A translatable attribute paired with the attribute holding its source content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatableAttribute {
    /// Attribute name translations are stored under, e.g. `title`
    pub translated: String,

    /// Attribute holding the source-language content, e.g. `title_en` or `_title`
    pub source: String,

    pub kind: AttributeKind,
}

impl TranslatableAttribute {
    pub fn direct(translated: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            translated: translated.into(),
            source: source.into(),
            kind: AttributeKind::Direct,
        }
    }

    /// Recursive attributes are their own source.
    pub fn recursive(attribute: impl Into<String>, validator: ValidatorRef) -> Self {
        let attribute = attribute.into();
        Self {
            source: attribute.clone(),
            translated: attribute,
            kind: AttributeKind::Recursive(validator),
        }
    }

    pub fn is_recursive(&self) -> bool {
        matches!(self.kind, AttributeKind::Recursive(_))
    }
}

/// Resolves the translatable attributes of one item.
///
/// The resolver borrows the item read-only and keeps the lazily computed
/// currently-translatable set to itself. Create a new resolver after the
/// item changes.
pub struct AttributeResolver<'a, I: ?Sized> {
    item: &'a I,
    currently_translatable: OnceCell<Vec<TranslatableAttribute>>,
}

impl<'a, I: TranslatableItem + ?Sized> AttributeResolver<'a, I> {
    pub fn new(item: &'a I) -> Self {
        Self {
            item,
            currently_translatable: OnceCell::new(),
        }
    }

    pub fn item(&self) -> &'a I {
        self.item
    }

    /// Attributes translated directly through the configured mechanisms.
    ///
    /// Attribute-message attributes take their source from `_<attribute>`,
    /// column attributes from `<attribute>_<source language>`. An attribute
    /// configured under both keeps its first position and the column source.
    pub fn directly_translatable(&self) -> Vec<TranslatableAttribute> {
        let behaviors = self.item.translation_behaviors();
        let mut attributes = Vec::new();

        if let Some(messages) = &behaviors.attribute_messages {
            for attribute in &messages.translation_attributes {
                upsert(
                    &mut attributes,
                    TranslatableAttribute::direct(attribute, format!("_{}", attribute)),
                );
            }
        }

        if let Some(columns) = &behaviors.columns {
            for attribute in &columns.translation_attributes {
                upsert(
                    &mut attributes,
                    TranslatableAttribute::direct(
                        attribute,
                        format!("{}_{}", attribute, self.item.source_language()),
                    ),
                );
            }
        }

        attributes
    }

    /// Attributes whose content is translated recursively, with their validators.
    pub fn recursively_translatable(&self) -> Vec<(String, ValidatorRef)> {
        self.item.recursively_translatable_attributes()
    }

    /// All translatable attributes: direct ones first, then recursive ones.
    pub fn translatable(&self) -> Vec<TranslatableAttribute> {
        let mut attributes = self.directly_translatable();
        for (attribute, validator) in self.recursively_translatable() {
            upsert(
                &mut attributes,
                TranslatableAttribute::recursive(attribute, validator),
            );
        }
        attributes
    }

    /// Translatable attributes that currently have source content.
    ///
    /// Source content is present when the source attribute is set, not
    /// null, and not an empty array or object. Unset attributes are never
    /// an error.
    pub fn currently_translatable(&self) -> &[TranslatableAttribute] {
        self.currently_translatable.get_or_init(|| {
            let current: Vec<TranslatableAttribute> = self
                .translatable()
                .into_iter()
                .filter(|attribute| has_content(self.item.attribute(&attribute.source)))
                .collect();

            debug!(
                table = self.item.table_name(),
                attributes = ?current.iter().map(|a| a.translated.as_str()).collect::<Vec<_>>(),
                "Resolved currently translatable attributes"
            );

            current
        })
    }

    pub fn is_currently_translatable(&self, attribute: &str) -> bool {
        self.currently_translatable()
            .iter()
            .any(|a| a.translated == attribute)
    }

    /// Validator of a recursively translatable attribute.
    pub fn validator_for(&self, attribute: &str) -> Option<ValidatorRef> {
        self.recursively_translatable()
            .into_iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, validator)| validator)
    }

    /// Remove the `_<source language>` suffix from a field name, if present.
    pub fn strip_source_language<'f>(&self, field: &'f str) -> &'f str {
        let suffix = format!("_{}", self.item.source_language());
        field.strip_suffix(suffix.as_str()).unwrap_or(field)
    }

    /// Source-suffixed fields whose attribute is currently translatable.
    pub fn matching_currently_translatable<S: AsRef<str>>(&self, fields: &[S]) -> Vec<String> {
        fields
            .iter()
            .map(|field| field.as_ref())
            .filter(|field| self.is_currently_translatable(self.strip_source_language(field)))
            .map(str::to_string)
            .collect()
    }

    /// Source-suffixed fields whose attribute is translatable, as `(field, attribute)` pairs.
    pub fn matching_translatable<S: AsRef<str>>(&self, fields: &[S]) -> Vec<(String, String)> {
        self.matching(fields, &self.translatable())
    }

    /// Source-suffixed fields whose attribute is directly translatable, as `(field, attribute)` pairs.
    pub fn matching_directly_translatable<S: AsRef<str>>(
        &self,
        fields: &[S],
    ) -> Vec<(String, String)> {
        self.matching(fields, &self.directly_translatable())
    }

    /// Rewrite attribute names to the fields holding their source content.
    ///
    /// Directly translatable attributes become `<attribute>_<source language>`,
    /// multilingual relations become their source-language relation name.
    /// Other names are kept as they are.
    pub fn add_source_language_to_directly_translatable<S: AsRef<str>>(
        &self,
        fields: &[S],
    ) -> Vec<String> {
        let source_language = self.item.source_language();
        let direct = self.directly_translatable();
        let relations = self
            .item
            .translation_behaviors()
            .columns
            .as_ref()
            .map(|columns| columns.multilingual_relations.as_slice())
            .unwrap_or_default();

        fields
            .iter()
            .map(|field| field.as_ref())
            .map(|field| {
                if direct.iter().any(|a| a.translated == field) {
                    return format!("{}_{}", field, source_language);
                }
                match relations.iter().find(|(relation, _)| relation == field) {
                    Some((_, template)) => relations::relation_name(template, source_language),
                    None => field.to_string(),
                }
            })
            .collect()
    }

    fn matching<S: AsRef<str>>(
        &self,
        fields: &[S],
        attributes: &[TranslatableAttribute],
    ) -> Vec<(String, String)> {
        fields
            .iter()
            .map(|field| field.as_ref())
            .filter_map(|field| {
                let attribute = self.strip_source_language(field);
                attributes
                    .iter()
                    .any(|a| a.translated == attribute)
                    .then(|| (field.to_string(), attribute.to_string()))
            })
            .collect()
    }
}

/// Insert an attribute, replacing an existing entry with the same name in place.
fn upsert(attributes: &mut Vec<TranslatableAttribute>, attribute: TranslatableAttribute) {
    match attributes
        .iter_mut()
        .find(|a| a.translated == attribute.translated)
    {
        Some(existing) => *existing = attribute,
        None => attributes.push(attribute),
    }
}

fn has_content(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(fields)) => !fields.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translatable::{
        AttributeMessagesConfig, ColumnsConfig, ItemSnapshot, TranslationBehaviors,
    };
    use serde_json::json;

    fn behaviors() -> TranslationBehaviors {
        TranslationBehaviors {
            attribute_messages: Some(AttributeMessagesConfig {
                translation_attributes: vec!["caption".to_string()],
            }),
            columns: Some(ColumnsConfig {
                translation_attributes: vec!["title".to_string(), "about".to_string()],
                multilingual_relations: vec![("image".to_string(), "image_media_id".to_string())],
            }),
        }
    }

    fn item() -> ItemSnapshot {
        ItemSnapshot::new("chapter", "en")
            .with_behaviors(behaviors())
            .with_recursive("contents", "validateContents")
    }

    fn names(attributes: &[TranslatableAttribute]) -> Vec<&str> {
        attributes.iter().map(|a| a.translated.as_str()).collect()
    }

    // ==================== Direct Attribute Tests ====================

    #[test]
    fn test_directly_translatable_sources() {
        let item = item();
        let resolver = AttributeResolver::new(&item);
        assert_eq!(
            resolver.directly_translatable(),
            vec![
                TranslatableAttribute::direct("caption", "_caption"),
                TranslatableAttribute::direct("title", "title_en"),
                TranslatableAttribute::direct("about", "about_en"),
            ]
        );
    }

    #[test]
    fn test_directly_translatable_without_mechanisms() {
        let item = ItemSnapshot::new("chapter", "en");
        let resolver = AttributeResolver::new(&item);
        assert!(resolver.directly_translatable().is_empty());
        assert!(resolver.translatable().is_empty());
    }

    #[test]
    fn test_column_mechanism_overrides_attribute_messages() {
        let mut behaviors = behaviors();
        behaviors
            .attribute_messages
            .as_mut()
            .unwrap()
            .translation_attributes
            .push("title".to_string());
        let item = ItemSnapshot::new("chapter", "de").with_behaviors(behaviors);
        let resolver = AttributeResolver::new(&item);
        let direct = resolver.directly_translatable();

        assert_eq!(names(&direct), vec!["caption", "title", "about"]);
        assert_eq!(direct[1].source, "title_de");
    }

    // ==================== Recursive Attribute Tests ====================

    #[test]
    fn test_recursive_attributes_map_to_themselves() {
        let item = item();
        let resolver = AttributeResolver::new(&item);
        let translatable = resolver.translatable();

        assert_eq!(names(&translatable), vec!["caption", "title", "about", "contents"]);
        let contents = &translatable[3];
        assert_eq!(contents.source, "contents");
        assert_eq!(
            contents.kind,
            AttributeKind::Recursive(ValidatorRef::new("validateContents"))
        );
        assert!(contents.is_recursive());
    }

    #[test]
    fn test_validator_for() {
        let item = item();
        let resolver = AttributeResolver::new(&item);
        assert_eq!(
            resolver.validator_for("contents"),
            Some(ValidatorRef::new("validateContents"))
        );
        assert_eq!(resolver.validator_for("title"), None);
    }

    // ==================== Currently Translatable Tests ====================

    #[test]
    fn test_currently_translatable_requires_content() {
        let item = item()
            .with_attribute("title_en", json!("Hello"))
            .with_attribute("about_en", Value::Null)
            .with_attribute("_caption", json!(""))
            .with_attribute("contents", json!([]));
        let resolver = AttributeResolver::new(&item);

        assert_eq!(names(resolver.currently_translatable()), vec!["caption", "title"]);
    }

    #[test]
    fn test_currently_translatable_containers() {
        let item = item()
            .with_attribute("contents", json!([{ "type": "text" }]))
            .with_attribute("about_en", json!({}));
        let resolver = AttributeResolver::new(&item);

        assert_eq!(names(resolver.currently_translatable()), vec!["contents"]);
        assert!(resolver.is_currently_translatable("contents"));
        assert!(!resolver.is_currently_translatable("about"));
    }

    #[test]
    fn test_currently_translatable_on_unset_item() {
        let item = item();
        let resolver = AttributeResolver::new(&item);
        assert!(resolver.currently_translatable().is_empty());
    }

    #[test]
    fn test_currently_translatable_is_per_resolver() {
        let mut item = item();
        {
            let resolver = AttributeResolver::new(&item);
            assert!(resolver.currently_translatable().is_empty());
        }
        item.attributes.insert("title_en".to_string(), json!("Hi"));
        let resolver = AttributeResolver::new(&item);
        assert_eq!(names(resolver.currently_translatable()), vec!["title"]);
    }

    // ==================== Matching Tests ====================

    #[test]
    fn test_matching_currently_translatable() {
        let item = item().with_attribute("title_en", json!("Hello"));
        let resolver = AttributeResolver::new(&item);
        let matched =
            resolver.matching_currently_translatable(&["title_en", "about_en", "slug"]);
        assert_eq!(matched, vec!["title_en"]);
    }

    #[test]
    fn test_matching_translatable() {
        let item = item();
        let resolver = AttributeResolver::new(&item);
        let matched = resolver.matching_translatable(&["title_en", "contents_en", "slug_en"]);
        assert_eq!(
            matched,
            vec![
                ("title_en".to_string(), "title".to_string()),
                ("contents_en".to_string(), "contents".to_string()),
            ]
        );
    }

    #[test]
    fn test_matching_directly_translatable_excludes_recursive() {
        let item = item();
        let resolver = AttributeResolver::new(&item);
        let matched = resolver.matching_directly_translatable(&["title_en", "contents_en"]);
        assert_eq!(matched, vec![("title_en".to_string(), "title".to_string())]);
    }

    #[test]
    fn test_strip_source_language_only_strips_suffix() {
        let item = item();
        let resolver = AttributeResolver::new(&item);
        assert_eq!(resolver.strip_source_language("title_en"), "title");
        assert_eq!(resolver.strip_source_language("en_title"), "en_title");
        assert_eq!(resolver.strip_source_language("title"), "title");
    }

    // ==================== Source Language Rewrite Tests ====================

    #[test]
    fn test_add_source_language_to_directly_translatable() {
        let item = item();
        let resolver = AttributeResolver::new(&item);
        let fields =
            resolver.add_source_language_to_directly_translatable(&["title", "image", "slug", "contents"]);
        assert_eq!(fields, vec!["title_en", "imageMediaIdEn", "slug", "contents"]);
    }

    #[test]
    fn test_add_source_language_for_attribute_messages() {
        let item = item();
        let resolver = AttributeResolver::new(&item);
        let fields = resolver.add_source_language_to_directly_translatable(&["caption"]);
        assert_eq!(fields, vec!["caption_en"]);
    }
}
