//! Mapping between translatable field names, shadow columns and virtual
//! attribute names.
//!
//! Virtual names are `<field>_<language>`. The mapping is only injective while
//! no field name ends in `_<language>` of another configured field; this is
//! not checked.

use translation_core_api::{LanguageCode, LanguageSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameScheme {
    prefix: String,
}

impl NameScheme {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Shadow table column holding `field`.
    pub fn shadow_column(&self, field: &str) -> String {
        format!("{}{}", self.prefix, field)
    }

    /// Per-language virtual attribute for `field`.
    pub fn virtual_attr(field: &str, language: &str) -> String {
        format!("{field}_{language}")
    }

    /// Splits a virtual attribute name back into its configured field and language.
    pub fn parse_virtual<'a>(
        name: &str,
        fields: &'a [String],
        languages: &'a LanguageSet,
    ) -> Option<(&'a str, &'a LanguageCode)> {
        let (field, language) = name.rsplit_once('_')?;
        let field = fields.iter().find(|f| f.as_str() == field)?;
        let language = languages.get(language)?;
        Some((field.as_str(), language))
    }
}

impl Default for NameScheme {
    fn default() -> Self {
        Self::new("localized_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_column_uses_prefix() {
        assert_eq!(NameScheme::default().shadow_column("title"), "localized_title");
        assert_eq!(NameScheme::new("l_").shadow_column("body"), "l_body");
        assert_eq!(NameScheme::new("").shadow_column("body"), "body");
    }

    #[test]
    fn test_virtual_attr_round_trips_through_parse() {
        let fields = vec!["title".to_string(), "meta_title".to_string()];
        let languages = LanguageSet::new(["en", "fr"]).unwrap();

        let name = NameScheme::virtual_attr("meta_title", "fr");
        assert_eq!(name, "meta_title_fr");
        let (field, language) = NameScheme::parse_virtual(&name, &fields, &languages).unwrap();
        assert_eq!(field, "meta_title");
        assert_eq!(language.as_str(), "fr");

        assert!(NameScheme::parse_virtual("title_de", &fields, &languages).is_none());
        assert!(NameScheme::parse_virtual("summary_en", &fields, &languages).is_none());
        assert!(NameScheme::parse_virtual("title", &fields, &languages).is_none());
    }
}
