use heapless::String as HeaplessString;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{TranslationError, TranslationResult};

/// Maximum length of a language code such as `en`, `pt-BR` or `zh-Hant-TW`.
pub const LANGUAGE_CODE_CAPACITY: usize = 16;

/// A language code as stored in the shadow table's language column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(HeaplessString<LANGUAGE_CODE_CAPACITY>);

impl LanguageCode {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for LanguageCode {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TranslationError::Configuration(
                "Language code must not be empty".to_string(),
            ));
        }
        HeaplessString::from_str(trimmed).map(LanguageCode).map_err(|_| {
            TranslationError::Configuration(format!(
                "Language code '{trimmed}' is too long (max {LANGUAGE_CODE_CAPACITY} chars)"
            ))
        })
    }
}

impl TryFrom<&str> for LanguageCode {
    type Error = TranslationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = TranslationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0.as_str().to_string()
    }
}

impl PartialEq<str> for LanguageCode {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for LanguageCode {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, deduplicated list of configured languages.
///
/// Deserializes from either a list of codes (`["en", "fr"]`) or a map whose
/// keys are the codes (`{"en": "English", "fr": "Français"}`). Map values are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<LanguageCode>")]
pub struct LanguageSet {
    codes: Vec<LanguageCode>,
}

impl LanguageSet {
    pub fn new<I, S>(codes: I) -> TranslationResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = LanguageSet::default();
        for code in codes {
            set.push(code.as_ref().parse()?);
        }
        Ok(set)
    }

    fn push(&mut self, code: LanguageCode) {
        if !self.codes.contains(&code) {
            self.codes.push(code);
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    /// Returns the configured code equal to `code`, if any.
    pub fn get(&self, code: &str) -> Option<&LanguageCode> {
        self.codes.iter().find(|c| *c == code)
    }

    pub fn first(&self) -> Option<&LanguageCode> {
        self.codes.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageCode> {
        self.codes.iter()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl From<LanguageSet> for Vec<LanguageCode> {
    fn from(set: LanguageSet) -> Self {
        set.codes
    }
}

impl<'a> IntoIterator for &'a LanguageSet {
    type Item = &'a LanguageCode;
    type IntoIter = std::slice::Iter<'a, LanguageCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

impl<'de> Deserialize<'de> for LanguageSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LanguageSetVisitor;

        impl<'de> Visitor<'de> for LanguageSetVisitor {
            type Value = LanguageSet;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a list of language codes or a map keyed by language code")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut set = LanguageSet::default();
                while let Some(code) = seq.next_element::<String>()? {
                    set.push(code.parse().map_err(de::Error::custom)?);
                }
                Ok(set)
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut set = LanguageSet::default();
                while let Some((code, _)) = map.next_entry::<String, IgnoredAny>()? {
                    set.push(code.parse().map_err(de::Error::custom)?);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_any(LanguageSetVisitor)
    }
}

/// Language state of the surrounding application, passed explicitly into
/// every load, save and localization call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageContext {
    current: LanguageCode,
}

impl LanguageContext {
    pub fn new(current: LanguageCode) -> Self {
        Self { current }
    }

    pub fn current(&self) -> &LanguageCode {
        &self.current
    }

    /// Returns a copy of this context switched to another language.
    pub fn with_language(&self, language: LanguageCode) -> Self {
        Self { current: language }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code_rejects_overlong_and_empty_codes() {
        assert!(LanguageCode::try_from("en").is_ok());
        assert!(LanguageCode::try_from("  ").is_err());
        assert!(LanguageCode::try_from("x-this-code-is-far-too-long").is_err());
    }

    #[test]
    fn test_language_set_deduplicates_and_keeps_order() {
        let set = LanguageSet::new(["fr", "en", "fr", "de"]).unwrap();
        let codes: Vec<&str> = set.iter().map(|c| c.as_str()).collect();
        assert_eq!(codes, vec!["fr", "en", "de"]);
        assert!(set.contains("de"));
        assert!(!set.contains("es"));
    }

    #[test]
    fn test_language_set_from_list() {
        let set: LanguageSet = serde_json::from_str(r#"["en", "fr", "en"]"#).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.first().unwrap().as_str(), "en");
    }

    #[test]
    fn test_language_set_from_map_uses_keys_only() {
        let set: LanguageSet =
            serde_json::from_str(r#"{"pt": "Português", "en": "English"}"#).unwrap();
        assert!(set.contains("pt"));
        assert!(set.contains("en"));
        assert!(!set.contains("English"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_context_switch_leaves_original_untouched() {
        let ctx = LanguageContext::new("en".parse().unwrap());
        let fr = ctx.with_language("fr".parse().unwrap());
        assert_eq!(ctx.current().as_str(), "en");
        assert_eq!(fr.current().as_str(), "fr");
    }
}
