//! Translation of PO-JSON message catalogs stored on items.
//!
//! PO-JSON maps message ids (optionally prefixed with a context and
//! `\u{4}`) to arrays. The first element is the plural message id, or
//! null for singular messages; translations follow.

use super::item::TranslatableItem;
use crate::error::Result;
use crate::i18n::{plural, PluralCatalog, PluralMessageSet};
pub use crate::i18n::MessageSource;
use serde_json::{Map, Value};
use tracing::debug;

/// Attribute name PO-JSON contents are stored under.
pub const PO_CONTENTS_ATTRIBUTE: &str = "po_contents";

/// Separator between context and message id in PO-JSON keys.
const CONTEXT_SEPARATOR: char = '\u{4}';

/// Message category of an item attribute.
///
/// With a context: `<table>-<id>-<context>-<attribute>`;
/// without: `<table>i18n_catalog-<id>-<attribute>`.
pub fn translation_category<I: TranslatableItem + ?Sized>(
    item: &I,
    attribute: &str,
    context: Option<&str>,
) -> String {
    match context {
        Some(context) => format!(
            "{}-{}-{}-{}",
            item.table_name(),
            item.id(),
            context,
            attribute
        ),
        None => format!(
            "{}i18n_catalog-{}-{}",
            item.table_name(),
            item.id(),
            attribute
        ),
    }
}

/// Translate every message of a PO-JSON catalog into `language`.
///
/// Singular entries get their translation as the second element. Plural
/// entries are looked up as a source-language plural string and decoded
/// for the target language; forms the target language has but the
/// translation lacks are taken from the `true` category. The header entry
/// (empty key) and entries that are not arrays are kept as they are.
pub fn translate_po_json_messages<I, S, C>(
    item: &I,
    messages: &Map<String, Value>,
    language: &str,
    source: &S,
    catalog: &C,
) -> Result<Map<String, Value>>
where
    I: TranslatableItem + ?Sized,
    S: MessageSource + ?Sized,
    C: PluralCatalog,
{
    let mut translated = messages.clone();

    for (key, entry) in translated.iter_mut() {
        if key.is_empty() {
            continue;
        }
        let Value::Array(forms) = entry else {
            continue;
        };

        let (context, source_message) = match key.split_once(CONTEXT_SEPARATOR) {
            Some((context, message)) => (Some(context), message),
            None => (None, key.as_str()),
        };
        let category = translation_category(item, PO_CONTENTS_ATTRIBUTE, context);

        match forms.first() {
            Some(plural_id) if !plural_id.is_null() => {
                let plural_id = plural_id.clone();
                let plural_message = match &plural_id {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                let source_forms = PluralMessageSet::from_forms(
                    &[source_message, plural_message.as_str()],
                    item.source_language(),
                    catalog,
                )?;
                let source_string = plural::encode(&source_forms, item.source_language(), catalog)?;
                let message = source.translate(&category, &source_string, language);
                let decoded = plural::decode(&message, language, catalog)?;

                let mut translated_forms = vec![plural_id];
                for (plural_category, _) in decoded.iter() {
                    let form = decoded.get_or_fallback(plural_category)?;
                    translated_forms.push(form.map_or(Value::Null, |f| Value::String(f.to_string())));
                }
                *forms = translated_forms;
            }
            _ => {
                let message = source.translate(&category, source_message, language);
                if forms.is_empty() {
                    forms.push(Value::Null);
                }
                if forms.len() < 2 {
                    forms.push(Value::String(message));
                } else {
                    forms[1] = Value::String(message);
                }
            }
        }
    }

    debug!(
        table = item.table_name(),
        language,
        entries = translated.len(),
        "Translated PO-JSON messages"
    );

    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{CatalogConfig, LanguageRegistry};
    use crate::translatable::ItemSnapshot;
    use crate::I18nError;
    use serde_json::json;
    use std::collections::HashMap;

    struct StaticSource(HashMap<(String, String), String>);

    impl StaticSource {
        fn new(entries: &[(&str, &str, &str)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(category, message, translation)| {
                        ((category.to_string(), message.to_string()), translation.to_string())
                    })
                    .collect(),
            )
        }
    }

    impl MessageSource for StaticSource {
        fn translate(&self, category: &str, message: &str, _language: &str) -> String {
            self.0
                .get(&(category.to_string(), message.to_string()))
                .cloned()
                .unwrap_or_else(|| message.to_string())
        }
    }

    fn registry() -> LanguageRegistry {
        let catalog: CatalogConfig = serde_json::from_str(
            r#"{
                "languages": { "en": "English", "pl": "Polish" },
                "language_directions": { "en": "ltr", "pl": "ltr" },
                "plural_categories": {
                    "en": ["one", "true"],
                    "pl": ["one", "few", "true"]
                }
            }"#,
        )
        .expect("Catalog should parse");
        LanguageRegistry::from_catalog(catalog)
    }

    fn item() -> ItemSnapshot {
        ItemSnapshot::new("snowflake", "en").with_attribute("id", json!(5))
    }

    // ==================== Category Tests ====================

    #[test]
    fn test_translation_category_with_context() {
        assert_eq!(
            translation_category(&item(), "po_contents", Some("menu")),
            "snowflake-5-menu-po_contents"
        );
    }

    #[test]
    fn test_translation_category_without_context() {
        assert_eq!(
            translation_category(&item(), "po_contents", None),
            "snowflakei18n_catalog-5-po_contents"
        );
    }

    // ==================== Translation Tests ====================

    #[test]
    fn test_singular_message() {
        let source = StaticSource::new(&[(
            "snowflakei18n_catalog-5-po_contents",
            "Hello",
            "Cześć",
        )]);
        let messages = json!({ "": { "lang": "en" }, "Hello": [null, ""] });
        let translated = translate_po_json_messages(
            &item(),
            messages.as_object().unwrap(),
            "pl",
            &source,
            &registry(),
        )
        .unwrap();

        assert_eq!(translated["Hello"], json!([null, "Cześć"]));
        assert_eq!(translated[""], json!({ "lang": "en" }));
    }

    #[test]
    fn test_singular_message_with_context() {
        let source = StaticSource::new(&[("snowflake-5-menu-po_contents", "Open", "Otwórz")]);
        let messages = json!({ "menu\u{4}Open": [null] });
        let translated = translate_po_json_messages(
            &item(),
            messages.as_object().unwrap(),
            "pl",
            &source,
            &registry(),
        )
        .unwrap();

        assert_eq!(translated["menu\u{4}Open"], json!([null, "Otwórz"]));
    }

    #[test]
    fn test_plural_message_uses_true_fallback() {
        let source = StaticSource::new(&[(
            "snowflakei18n_catalog-5-po_contents",
            "one#apple|true#apples",
            "one#jabłko|true#jabłka",
        )]);
        let messages = json!({ "apple": ["apples", "", ""] });
        let translated = translate_po_json_messages(
            &item(),
            messages.as_object().unwrap(),
            "pl",
            &source,
            &registry(),
        )
        .unwrap();

        assert_eq!(
            translated["apple"],
            json!(["apples", "jabłko", "jabłka", "jabłka"])
        );
    }

    #[test]
    fn test_plural_message_without_fallback_category() {
        let catalog: CatalogConfig = serde_json::from_str(
            r#"{
                "languages": { "en": "English", "ru": "Russian" },
                "plural_categories": { "en": ["one", "other"], "ru": ["one", "few", "other"] }
            }"#,
        )
        .unwrap();
        let registry = LanguageRegistry::from_catalog(catalog);
        let source = StaticSource::new(&[]);
        let messages = json!({ "apple": ["apples"] });

        let result = translate_po_json_messages(
            &item(),
            messages.as_object().unwrap(),
            "ru",
            &source,
            &registry,
        );
        assert!(matches!(
            result,
            Err(I18nError::MissingFallbackCategory { .. })
        ));
    }

    #[test]
    fn test_non_string_plural_id_is_still_plural() {
        let source = StaticSource::new(&[(
            "snowflakei18n_catalog-5-po_contents",
            "one#item|true#2",
            "one#element|true#elementy",
        )]);
        let messages = json!({ "item": [2, ""] });
        let translated = translate_po_json_messages(
            &item(),
            messages.as_object().unwrap(),
            "pl",
            &source,
            &registry(),
        )
        .unwrap();

        assert_eq!(
            translated["item"],
            json!([2, "element", "elementy", "elementy"])
        );
    }

    #[test]
    fn test_non_array_entries_are_kept() {
        let messages = json!({ "odd": "value" });
        let translated = translate_po_json_messages(
            &item(),
            messages.as_object().unwrap(),
            "pl",
            &StaticSource::new(&[]),
            &registry(),
        )
        .unwrap();
        assert_eq!(translated["odd"], json!("value"));
    }
}
