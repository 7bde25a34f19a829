use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{TranslationError, TranslationResult};
use crate::language::{LanguageCode, LanguageSet};

fn default_foreign_key() -> String {
    "owner_id".to_string()
}

fn default_language_field() -> String {
    "language".to_string()
}

fn default_localized_prefix() -> String {
    "localized_".to_string()
}

fn default_create_scenarios() -> Vec<String> {
    vec!["create".to_string()]
}

fn default_true() -> bool {
    true
}

/// Options recognized by the translation behavior, as supplied by the integrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TranslationConfig {
    /// Shadow table name. Defaults to `<primary_table>_localized`.
    #[serde(default)]
    pub table_name: Option<String>,

    /// Shadow model type name. Defaults to `<Entity>Localized`.
    #[serde(default)]
    pub model_name: Option<String>,

    #[serde(default = "default_foreign_key")]
    pub foreign_key: String,

    #[serde(default = "default_language_field")]
    pub language_field: String,

    #[validate(length(min = 1, message = "at least one translatable attribute is required"))]
    #[serde(default)]
    pub translation_attributes: Vec<String>,

    #[serde(default = "default_localized_prefix")]
    pub localized_prefix: String,

    #[serde(default)]
    pub languages: LanguageSet,

    /// Defaults to the first configured language.
    #[serde(default)]
    pub default_language: Option<String>,

    #[serde(default = "default_create_scenarios")]
    pub create_scenarios: Vec<String>,

    #[serde(default)]
    pub localized_relation: Option<String>,

    #[serde(default)]
    pub internationalized_relation: Option<String>,

    #[serde(default)]
    pub force_overwrite: bool,

    #[serde(default)]
    pub force_delete: bool,

    /// When false the shadow model must already be declared in the registry.
    #[serde(default = "default_true")]
    pub dynamic_shadow_model: bool,
}

impl TranslationConfig {
    pub fn new<I, S>(translation_attributes: I, languages: LanguageSet) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table_name: None,
            model_name: None,
            foreign_key: default_foreign_key(),
            language_field: default_language_field(),
            translation_attributes: translation_attributes.into_iter().map(Into::into).collect(),
            localized_prefix: default_localized_prefix(),
            languages,
            default_language: None,
            create_scenarios: default_create_scenarios(),
            localized_relation: None,
            internationalized_relation: None,
            force_overwrite: false,
            force_delete: false,
            dynamic_shadow_model: true,
        }
    }

    pub fn from_json_str(json: &str) -> TranslationResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| TranslationError::Configuration(format!("Invalid configuration: {e}")))
    }

    /// Validates the options and fills in the defaults that depend on the owner.
    pub fn resolve(&self, entity_name: &str, primary_table: &str) -> TranslationResult<ResolvedConfig> {
        self.validate()
            .map_err(|e| TranslationError::Configuration(e.to_string()))?;

        if self.languages.is_empty() {
            return Err(TranslationError::Configuration(
                "At least one language must be configured".to_string(),
            ));
        }

        let default_language = match &self.default_language {
            Some(code) => self.languages.get(code).cloned().ok_or_else(|| {
                TranslationError::Configuration(format!(
                    "Default language '{code}' is not one of the configured languages"
                ))
            })?,
            None => self
                .languages
                .first()
                .cloned()
                .ok_or_else(|| TranslationError::Configuration("No languages configured".to_string()))?,
        };

        let table_name = self
            .table_name
            .clone()
            .unwrap_or_else(|| format!("{primary_table}_localized"));

        let mut translation_attributes: Vec<String> = Vec::new();
        for attribute in &self.translation_attributes {
            let attribute = attribute.trim();
            check_identifier("translation attribute", attribute)?;
            if !translation_attributes.iter().any(|a| a == attribute) {
                translation_attributes.push(attribute.to_string());
            }
        }

        check_identifier("table name", &table_name)?;
        check_identifier("foreign key", &self.foreign_key)?;
        check_identifier("language field", &self.language_field)?;
        if !self.localized_prefix.is_empty() {
            check_identifier("localized prefix", &self.localized_prefix)?;
        }

        Ok(ResolvedConfig {
            entity_name: entity_name.to_string(),
            table_name,
            model_name: self
                .model_name
                .clone()
                .unwrap_or_else(|| format!("{entity_name}Localized")),
            foreign_key: self.foreign_key.clone(),
            language_field: self.language_field.clone(),
            translation_attributes,
            localized_prefix: self.localized_prefix.clone(),
            languages: self.languages.clone(),
            default_language,
            create_scenarios: self.create_scenarios.clone(),
            localized_relation: self
                .localized_relation
                .clone()
                .unwrap_or_else(|| format!("localized{entity_name}")),
            internationalized_relation: self
                .internationalized_relation
                .clone()
                .unwrap_or_else(|| format!("internationalized{entity_name}")),
            force_overwrite: self.force_overwrite,
            force_delete: self.force_delete,
            dynamic_shadow_model: self.dynamic_shadow_model,
        })
    }
}

/// Configuration with every default applied and every name checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub entity_name: String,
    pub table_name: String,
    pub model_name: String,
    pub foreign_key: String,
    pub language_field: String,
    pub translation_attributes: Vec<String>,
    pub localized_prefix: String,
    pub languages: LanguageSet,
    pub default_language: LanguageCode,
    pub create_scenarios: Vec<String>,
    pub localized_relation: String,
    pub internationalized_relation: String,
    pub force_overwrite: bool,
    pub force_delete: bool,
    pub dynamic_shadow_model: bool,
}

impl ResolvedConfig {
    pub fn is_translatable(&self, attribute: &str) -> bool {
        self.translation_attributes.iter().any(|a| a == attribute)
    }

    pub fn is_create_scenario(&self, scenario: &str) -> bool {
        self.create_scenarios.iter().any(|s| s == scenario)
    }
}

/// Names end up in SQL statements, so only plain identifiers are accepted.
fn check_identifier(what: &str, name: &str) -> TranslationResult<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(TranslationError::Configuration(format!(
            "Invalid {what} '{name}': expected [A-Za-z_][A-Za-z0-9_]*"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_config() -> TranslationConfig {
        TranslationConfig::new(["title", "body"], LanguageSet::new(["en", "fr"]).unwrap())
    }

    #[test]
    fn test_resolve_fills_defaults() {
        let resolved = post_config().resolve("Post", "post").unwrap();
        assert_eq!(resolved.table_name, "post_localized");
        assert_eq!(resolved.model_name, "PostLocalized");
        assert_eq!(resolved.foreign_key, "owner_id");
        assert_eq!(resolved.language_field, "language");
        assert_eq!(resolved.localized_prefix, "localized_");
        assert_eq!(resolved.default_language.as_str(), "en");
        assert_eq!(resolved.localized_relation, "localizedPost");
        assert_eq!(resolved.internationalized_relation, "internationalizedPost");
        assert!(resolved.is_create_scenario("create"));
        assert!(resolved.dynamic_shadow_model);
    }

    #[test]
    fn test_resolve_requires_translation_attributes() {
        let mut config = post_config();
        config.translation_attributes.clear();
        let err = config.resolve("Post", "post").unwrap_err();
        assert!(matches!(err, TranslationError::Configuration(_)));
    }

    #[test]
    fn test_resolve_rejects_unknown_default_language() {
        let mut config = post_config();
        config.default_language = Some("de".to_string());
        assert!(config.resolve("Post", "post").is_err());

        config.default_language = Some("fr".to_string());
        assert_eq!(config.resolve("Post", "post").unwrap().default_language.as_str(), "fr");
    }

    #[test]
    fn test_resolve_rejects_unsafe_identifiers() {
        let mut config = post_config();
        config.table_name = Some("post; DROP TABLE post".to_string());
        assert!(config.resolve("Post", "post").is_err());
    }

    #[test]
    fn test_from_json_with_language_map() {
        let config = TranslationConfig::from_json_str(
            r#"{
                "translation_attributes": ["title"],
                "languages": {"en": "English", "fr": "Français"},
                "default_language": "en",
                "force_overwrite": true
            }"#,
        )
        .unwrap();
        assert!(config.force_overwrite);
        assert!(!config.force_delete);
        assert_eq!(config.create_scenarios, vec!["create".to_string()]);
        let resolved = config.resolve("Post", "post").unwrap();
        assert_eq!(resolved.languages.len(), 2);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(TranslationConfig::from_json_str("{\"languages\": 3}").is_err());
    }
}
