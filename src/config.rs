use crate::i18n::{CatalogConfig, LanguageRegistry};
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Language catalog
    pub catalog_file: Option<PathBuf>,
    pub languages: Option<Vec<String>>,

    // Items
    pub source_language: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // JSON catalog replacing the built-in language table
            catalog_file: std::env::var("I18N_CATALOG_FILE").ok().map(PathBuf::from),

            // Comma-separated subset of codes, e.g. "en,fr,de"
            languages: std::env::var("I18N_LANGUAGES").ok().map(|v| parse_codes(&v)),

            source_language: std::env::var("I18N_SOURCE_LANGUAGE")
                .unwrap_or_else(|_| "en".to_string()),
        })
    }

    /// Build the language registry this configuration describes.
    pub fn registry(&self) -> Result<LanguageRegistry> {
        let registry = match &self.catalog_file {
            Some(path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
                let catalog: CatalogConfig = serde_json::from_str(&contents)
                    .with_context(|| format!("Failed to parse catalog file {}", path.display()))?;
                LanguageRegistry::from_catalog(catalog)
            }
            None => LanguageRegistry::builtin().clone(),
        };

        match &self.languages {
            Some(codes) => registry
                .restricted_to(codes)
                .context("I18N_LANGUAGES names a language missing from the catalog"),
            None => Ok(registry),
        }
    }
}

fn parse_codes(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn clear_env() {
        std::env::remove_var("I18N_CATALOG_FILE");
        std::env::remove_var("I18N_LANGUAGES");
        std::env::remove_var("I18N_SOURCE_LANGUAGE");
    }

    // ==================== Environment Tests ====================

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = Config::from_env().expect("Should load");

        assert!(config.catalog_file.is_none());
        assert!(config.languages.is_none());
        assert_eq!(config.source_language, "en");
    }

    #[test]
    #[serial]
    fn test_from_env_languages() {
        clear_env();
        std::env::set_var("I18N_LANGUAGES", "fr, de,,sv ");
        std::env::set_var("I18N_SOURCE_LANGUAGE", "de");
        let config = Config::from_env().expect("Should load");
        clear_env();

        assert_eq!(
            config.languages,
            Some(vec!["fr".to_string(), "de".to_string(), "sv".to_string()])
        );
        assert_eq!(config.source_language, "de");
    }

    // ==================== Registry Tests ====================

    #[test]
    fn test_registry_builtin() {
        let config = Config {
            catalog_file: None,
            languages: None,
            source_language: "en".to_string(),
        };
        let registry = config.registry().expect("Should build");
        assert_eq!(
            registry.codes().unwrap(),
            LanguageRegistry::builtin().codes().unwrap()
        );
    }

    #[test]
    fn test_registry_restricted() {
        let config = Config {
            catalog_file: None,
            languages: Some(vec!["sv".to_string(), "fr".to_string()]),
            source_language: "en".to_string(),
        };
        let registry = config.registry().expect("Should build");
        assert_eq!(registry.codes().unwrap(), vec!["fr", "sv"]);
    }

    #[test]
    fn test_registry_unknown_language() {
        let config = Config {
            catalog_file: None,
            languages: Some(vec!["tlh".to_string()]),
            source_language: "en".to_string(),
        };
        assert!(config.registry().is_err());
    }

    #[test]
    fn test_registry_from_catalog_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{
                "languages": { "en": "English", "ar": "Arabic" },
                "language_directions": { "en": "ltr", "ar": "rtl" },
                "plural_categories": { "en": ["one", "other"] }
            }"#,
        )
        .expect("Failed to write catalog");

        let config = Config {
            catalog_file: Some(path),
            languages: None,
            source_language: "en".to_string(),
        };
        let registry = config.registry().expect("Should build");
        assert_eq!(registry.codes().unwrap(), vec!["en", "ar"]);
        assert!(registry.is_rtl("ar"));
    }

    #[test]
    fn test_registry_missing_catalog_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = Config {
            catalog_file: Some(temp_dir.path().join("missing.json")),
            languages: None,
            source_language: "en".to_string(),
        };
        let err = config.registry().unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog file"));
    }

    #[test]
    fn test_registry_invalid_catalog_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").expect("Failed to write catalog");

        let config = Config {
            catalog_file: Some(path),
            languages: None,
            source_language: "en".to_string(),
        };
        let err = config.registry().unwrap_err();
        assert!(err.to_string().contains("Failed to parse catalog file"));
    }
}
