//! Command line access to the language catalog, the plural codec and i18n rules.
//!
//! Usage:
//!   content-i18n languages                  # List languages with direction
//!   content-i18n encode <lang> <json>       # {"one": "..", "other": ".."} -> one#..|other#..
//!   content-i18n decode <lang> <string>     # one#..|other#.. -> JSON
//!   content-i18n rules <item.json>          # Print the i18n rules of an item snapshot
//!
//! Optional environment variables:
//! - I18N_CATALOG_FILE (JSON catalog, defaults to the built-in table)
//! - I18N_LANGUAGES (comma-separated subset of codes)
//! - I18N_SOURCE_LANGUAGE (for snapshots without one, defaults to en)

use anyhow::{bail, Context, Result};
use content_i18n::config::Config;
use content_i18n::i18n::{plural, LanguageRegistry, PluralMessageSet};
use content_i18n::translatable::{I18nRuleSynthesizer, ItemSnapshot};
use serde_json::{Map, Value};
use tracing::info;

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("content_i18n=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let registry = config.registry()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["languages"] => print_languages(&registry),
        ["encode", lang, json] => encode(&registry, lang, json),
        ["decode", lang, encoded] => decode(&registry, lang, encoded),
        ["rules", path] => print_rules(&config, &registry, path),
        _ => bail!(
            "Usage: content-i18n languages | encode <lang> <json> | decode <lang> <string> | rules <item.json>"
        ),
    }
}

fn print_languages(registry: &LanguageRegistry) -> Result<()> {
    for language in registry.language_list_with_direction()? {
        println!("{}\t{}\t{}", language.code, language.direction, language.name);
    }
    Ok(())
}

fn encode(registry: &LanguageRegistry, lang: &str, json: &str) -> Result<()> {
    let object: Map<String, Value> =
        serde_json::from_str(json).context("Expected a JSON object of category to message")?;

    let mut messages = PluralMessageSet::new();
    for (category, message) in object {
        let message = match message {
            Value::Null => None,
            Value::String(text) => Some(text),
            other => Some(other.to_string()),
        };
        messages.insert(category, message);
    }

    println!("{}", plural::encode(&messages, lang, registry)?);
    Ok(())
}

fn decode(registry: &LanguageRegistry, lang: &str, encoded: &str) -> Result<()> {
    let messages = plural::decode(encoded, lang, registry)?;

    let object: Map<String, Value> = messages
        .iter()
        .map(|(category, message)| {
            let value = message.map_or(Value::Null, |m| Value::String(m.to_string()));
            (category.to_string(), value)
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&object)?);
    Ok(())
}

fn print_rules(config: &Config, registry: &LanguageRegistry, path: &str) -> Result<()> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    let mut item: ItemSnapshot =
        serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path))?;
    if item.source_language.is_empty() {
        item.source_language = config.source_language.clone();
    }

    let rules = I18nRuleSynthesizer::new(registry).i18n_rules(&item)?;
    info!("Generated {} i18n rules for {}", rules.len(), path);

    println!("{}", serde_json::to_string_pretty(&rules)?);
    Ok(())
}
