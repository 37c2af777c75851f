//! Read-only item view and the declarative translation configuration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Translation mechanisms configured for an item type.
///
/// A mechanism that is not configured contributes no attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationBehaviors {
    /// Attributes translated through source messages; the source content
    /// lives in `_<attribute>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_messages: Option<AttributeMessagesConfig>,

    /// Attributes translated through per-language columns; the source
    /// content lives in `<attribute>_<source language>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<ColumnsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMessagesConfig {
    #[serde(default)]
    pub translation_attributes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnsConfig {
    #[serde(default)]
    pub translation_attributes: Vec<String>,

    /// Relation name to attribute template, e.g. `"image" -> "image_media_id"`.
    #[serde(default)]
    pub multilingual_relations: Vec<(String, String)>,
}

/// Name of the validator method that checks recursively translated content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatorRef(String);

impl ValidatorRef {
    pub fn new(method: impl Into<String>) -> Self {
        Self(method.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidatorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered translation workflow step and the source attributes it presents.
///
/// Attribute names are source-suffixed, e.g. `title_en`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub id: String,
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl WorkflowStep {
    pub fn new<S: Into<String>>(id: impl Into<String>, attributes: impl IntoIterator<Item = S>) -> Self {
        Self {
            id: id.into(),
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }
}

/// Item types whose attributes hold content that is itself translated.
///
/// Such attributes are validated by a dedicated validator method rather
/// than by checking a single translated value. Attributes and relations
/// are both listed here.
pub trait RecursivelyTranslatable {
    fn recursively_translatable_attributes(&self) -> Vec<(String, ValidatorRef)> {
        Vec::new()
    }
}

/// Read-only view of an item for translation purposes.
///
/// Nothing in this crate mutates an item through this view, so derived
/// attribute sets never leak into the live item.
pub trait TranslatableItem: RecursivelyTranslatable {
    /// Language the item's source content is authored in.
    fn source_language(&self) -> &str;

    fn translation_behaviors(&self) -> &TranslationBehaviors;

    /// Current value of an attribute; `None` when the attribute is not set.
    fn attribute(&self, name: &str) -> Option<&Value>;

    fn workflow_steps(&self) -> &[WorkflowStep];

    /// Name of the identity field.
    fn identity_attribute(&self) -> &str {
        "id"
    }

    /// Storage table name, used to build translation categories.
    fn table_name(&self) -> &str;

    /// Identity value, rendered as a string.
    fn id(&self) -> String {
        match self.attribute(self.identity_attribute()) {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

/// Owned snapshot of an item.
///
/// ```json
/// {
///   "table_name": "chapter",
///   "source_language": "en",
///   "behaviors": { "columns": { "translation_attributes": ["title"] } },
///   "recursive_attributes": { "contents": "validateContents" },
///   "workflow_steps": [{ "id": "info", "attributes": ["title_en"] }],
///   "attributes": { "id": 7, "title_en": "Hello" }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemSnapshot {
    #[serde(default)]
    pub table_name: String,
    /// Empty when the snapshot leaves the source language to the caller's default.
    #[serde(default)]
    pub source_language: String,
    #[serde(default)]
    pub behaviors: TranslationBehaviors,
    #[serde(default)]
    pub recursive_attributes: Map<String, Value>,
    #[serde(default)]
    pub workflow_steps: Vec<WorkflowStep>,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl ItemSnapshot {
    pub fn new(table_name: impl Into<String>, source_language: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            source_language: source_language.into(),
            ..Self::default()
        }
    }

    pub fn with_behaviors(mut self, behaviors: TranslationBehaviors) -> Self {
        self.behaviors = behaviors;
        self
    }

    pub fn with_recursive(mut self, attribute: impl Into<String>, validator: impl Into<String>) -> Self {
        self.recursive_attributes
            .insert(attribute.into(), Value::String(validator.into()));
        self
    }

    pub fn with_step(mut self, step: WorkflowStep) -> Self {
        self.workflow_steps.push(step);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }
}

impl RecursivelyTranslatable for ItemSnapshot {
    fn recursively_translatable_attributes(&self) -> Vec<(String, ValidatorRef)> {
        self.recursive_attributes
            .iter()
            .filter_map(|(attribute, validator)| {
                validator
                    .as_str()
                    .map(|method| (attribute.clone(), ValidatorRef::new(method)))
            })
            .collect()
    }
}

impl TranslatableItem for ItemSnapshot {
    fn source_language(&self) -> &str {
        &self.source_language
    }

    fn translation_behaviors(&self) -> &TranslationBehaviors {
        &self.behaviors
    }

    fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    fn workflow_steps(&self) -> &[WorkflowStep] {
        &self.workflow_steps
    }

    fn table_name(&self) -> &str {
        &self.table_name
    }
}
