//! Per-language names of multilingual relations.
//!
//! A multilingual relation stores one foreign key per language. For the
//! relation `image` with attribute template `image_media_id`, the French
//! column is `image_media_id_fr` and the relation is `imageMediaIdFr`.

use super::item::TranslationBehaviors;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Concrete attribute and relation names for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultilingualRelation {
    pub attribute: String,
    pub relation: String,
}

impl MultilingualRelation {
    pub fn for_language(template: &str, code: &str) -> Self {
        Self {
            attribute: attribute_name(template, code),
            relation: relation_name(template, code),
        }
    }
}

/// Column holding the relation for a language: `<template>_<code>`.
pub fn attribute_name(template: &str, code: &str) -> String {
    format!("{}_{}", template, code)
}

/// Relation name for a language: the column name camel-cased with a lowercase first letter.
pub fn relation_name(template: &str, code: &str) -> String {
    let mut name = String::new();
    for (index, word) in attribute_name(template, code)
        .split('_')
        .filter(|word| !word.is_empty())
        .enumerate()
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if index == 0 {
                name.extend(first.to_lowercase());
            } else {
                name.extend(first.to_uppercase());
            }
            name.push_str(chars.as_str());
        }
    }
    name
}

/// Per-language relation names, in relation declaration order and then
/// registry language order.
///
/// Serializes as a nested object keeping that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultilingualRelations {
    entries: Vec<(String, Vec<(String, MultilingualRelation)>)>,
}

impl MultilingualRelations {
    /// Names of `relation` for language `code`.
    pub fn get(&self, relation: &str, code: &str) -> Option<&MultilingualRelation> {
        self.languages(relation)?
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, names)| names)
    }

    /// Per-language names of one relation, in language order.
    pub fn languages(&self, relation: &str) -> Option<&[(String, MultilingualRelation)]> {
        self.entries
            .iter()
            .find(|(name, _)| name == relation)
            .map(|(_, languages)| languages.as_slice())
    }

    /// Relation names in declaration order.
    pub fn relations(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[(String, MultilingualRelation)])> {
        self.entries
            .iter()
            .map(|(name, languages)| (name.as_str(), languages.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for MultilingualRelations {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        struct Languages<'a>(&'a [(String, MultilingualRelation)]);

        impl Serialize for Languages<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (code, names) in self.0 {
                    map.serialize_entry(code, names)?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (relation, languages) in &self.entries {
            map.serialize_entry(relation, &Languages(languages))?;
        }
        map.end()
    }
}

/// Per-language names for every multilingual relation configured under the column mechanism.
///
/// Relations keep their configured order; languages follow `codes`.
pub fn multilingual_relations<S: AsRef<str>>(
    behaviors: &TranslationBehaviors,
    codes: &[S],
) -> MultilingualRelations {
    let Some(columns) = &behaviors.columns else {
        return MultilingualRelations::default();
    };

    let entries = columns
        .multilingual_relations
        .iter()
        .map(|(relation, template)| {
            let per_language = codes
                .iter()
                .map(|code| {
                    let code = code.as_ref();
                    (
                        code.to_string(),
                        MultilingualRelation::for_language(template, code),
                    )
                })
                .collect();
            (relation.clone(), per_language)
        })
        .collect();

    MultilingualRelations { entries }
}
