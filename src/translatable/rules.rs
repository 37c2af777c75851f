//! Validation rules driving translation forms and translation progress.
//!
//! Two scenario families are produced per language:
//!
//! - `translate_into_<lang>`: the whole item in one language. Every
//!   currently translatable attribute is required here, so the share of
//!   passing rules is the translation progress.
//! - `into_<lang>-step_<step>`: one workflow step of the translation form.
//!   Attributes are only marked safe here so partial input can be saved.
//!
//! Executing the rules is up to the caller; this module only produces them.

use super::attributes::AttributeResolver;
use super::item::{TranslatableItem, ValidatorRef};
use crate::error::Result;
use crate::i18n::LanguageRegistry;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Value the identity field is compared against in zero-progress rules.
/// No stored item has a negative identity.
pub const ZERO_PROGRESS_COMPARE_VALUE: i64 = -1;

/// Validation scenario a rule applies in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// `translate_into_<language>`
    TranslateInto(String),
    /// `into_<language>-step_<step>`
    IntoStep { language: String, step: String },
}

impl Scenario {
    pub fn translate_into(language: impl Into<String>) -> Self {
        Scenario::TranslateInto(language.into())
    }

    pub fn into_step(language: impl Into<String>, step: impl Into<String>) -> Self {
        Scenario::IntoStep {
            language: language.into(),
            step: step.into(),
        }
    }

    pub fn language(&self) -> &str {
        match self {
            Scenario::TranslateInto(language) => language,
            Scenario::IntoStep { language, .. } => language,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::TranslateInto(language) => write!(f, "translate_into_{}", language),
            Scenario::IntoStep { language, step } => write!(f, "into_{}-step_{}", language, step),
        }
    }
}

impl Serialize for Scenario {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Validator a rule invokes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "validator", rename_all = "snake_case")]
pub enum RuleValidator {
    /// Accept any value.
    Safe,
    /// Require a value.
    Required,
    /// Require the value to equal `compare_value`.
    Compare { compare_value: i64 },
    /// Run the item's own validator method.
    Inline { method: ValidatorRef },
}

/// A validation rule descriptor: which attribute, which validator, in which scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct I18nRule {
    pub attribute: String,
    #[serde(flatten)]
    pub validator: RuleValidator,
    #[serde(rename = "on")]
    pub scenario: Scenario,
}

impl I18nRule {
    pub fn new(attribute: impl Into<String>, validator: RuleValidator, scenario: Scenario) -> Self {
        Self {
            attribute: attribute.into(),
            validator,
            scenario,
        }
    }
}

/// Builds the i18n validation rules of items for the registry's languages.
pub struct I18nRuleSynthesizer<'r> {
    registry: &'r LanguageRegistry,
}

impl<'r> I18nRuleSynthesizer<'r> {
    pub fn new(registry: &'r LanguageRegistry) -> Self {
        Self { registry }
    }

    /// All i18n rules of an item.
    ///
    /// Items with nothing to translate, or with no source content yet, get
    /// the zero-progress rules. Otherwise, walking workflow steps and their
    /// fields in order, each currently translatable direct attribute gets a
    /// safe rule in the step scenario and a required rule in the language
    /// scenario, per language. Recursive attributes are delegated to
    /// [`inline_validator_rules`](Self::inline_validator_rules) once.
    ///
    /// Fails only when the language list cannot be resolved.
    pub fn i18n_rules<I: TranslatableItem + ?Sized>(&self, item: &I) -> Result<Vec<I18nRule>> {
        debug!(table = item.table_name(), "Building i18n rules");

        let resolver = AttributeResolver::new(item);

        if resolver.translatable().is_empty() {
            debug!(table = item.table_name(), "Nothing translatable, zero progress");
            return self.zero_progress_rules(item);
        }

        if resolver.currently_translatable().is_empty() {
            debug!(table = item.table_name(), "No source content yet, zero progress");
            return self.zero_progress_rules(item);
        }

        let codes = self.registry.codes()?;
        let mut rules = Vec::new();
        let mut delegated = HashSet::new();

        for step in item.workflow_steps() {
            for field in &step.attributes {
                let attribute = resolver.strip_source_language(field);
                if !resolver.is_currently_translatable(attribute) {
                    continue;
                }

                if let Some(validator) = resolver.validator_for(attribute) {
                    if delegated.insert(attribute.to_string()) {
                        rules.extend(self.resolved_inline_validator_rules(
                            &resolver, attribute, &validator,
                        )?);
                    }
                    continue;
                }

                for lang in &codes {
                    let translated = format!("{}_{}", attribute, lang);
                    rules.push(I18nRule::new(
                        translated.clone(),
                        RuleValidator::Safe,
                        Scenario::into_step(*lang, &step.id),
                    ));
                    rules.push(I18nRule::new(
                        translated,
                        RuleValidator::Required,
                        Scenario::translate_into(*lang),
                    ));
                }
            }
        }

        debug!(table = item.table_name(), rules = rules.len(), "Built i18n rules");
        Ok(rules)
    }

    /// One always-failing rule per language on the identity field.
    ///
    /// Every `translate_into_<lang>` scenario then has a rule that cannot
    /// pass, so translation progress reads 0%.
    pub fn zero_progress_rules<I: TranslatableItem + ?Sized>(
        &self,
        item: &I,
    ) -> Result<Vec<I18nRule>> {
        Ok(self
            .registry
            .codes()?
            .into_iter()
            .map(|lang| {
                I18nRule::new(
                    item.identity_attribute(),
                    RuleValidator::Compare {
                        compare_value: ZERO_PROGRESS_COMPARE_VALUE,
                    },
                    Scenario::translate_into(lang),
                )
            })
            .collect())
    }

    /// Rules running a recursive attribute's validator.
    ///
    /// Per language: one rule in the language scenario, plus one in each
    /// step scenario whose step lists `<attribute>_<source language>`.
    /// Nothing is produced when the attribute is not currently translatable.
    pub fn inline_validator_rules<I: TranslatableItem + ?Sized>(
        &self,
        item: &I,
        attribute: &str,
        validator: &ValidatorRef,
    ) -> Result<Vec<I18nRule>> {
        let resolver = AttributeResolver::new(item);
        self.resolved_inline_validator_rules(&resolver, attribute, validator)
    }

    fn resolved_inline_validator_rules<I: TranslatableItem + ?Sized>(
        &self,
        resolver: &AttributeResolver<'_, I>,
        attribute: &str,
        validator: &ValidatorRef,
    ) -> Result<Vec<I18nRule>> {
        if !resolver.is_currently_translatable(attribute) {
            return Ok(Vec::new());
        }

        let item = resolver.item();
        let source_field = format!("{}_{}", attribute, item.source_language());
        let inline = RuleValidator::Inline {
            method: validator.clone(),
        };

        let mut rules = Vec::new();
        for lang in self.registry.codes()? {
            rules.push(I18nRule::new(
                attribute,
                inline.clone(),
                Scenario::translate_into(lang),
            ));

            for step in item.workflow_steps() {
                let listed = step.attributes.iter().filter(|f| **f == source_field).count();
                for _ in 0..listed {
                    rules.push(I18nRule::new(
                        attribute,
                        inline.clone(),
                        Scenario::into_step(lang, &step.id),
                    ));
                }
            }
        }

        Ok(rules)
    }
}
