use translation_core_api::{LanguageSet, Rule, RuleKind};

use crate::naming::NameScheme;

/// Projects rules of translatable fields onto their virtual attributes.
pub struct RuleProjector<'a> {
    languages: &'a LanguageSet,
    fields: &'a [String],
    force_overwrite: bool,
}

impl<'a> RuleProjector<'a> {
    pub fn new(languages: &'a LanguageSet, fields: &'a [String], force_overwrite: bool) -> Self {
        Self {
            languages,
            fields,
            force_overwrite,
        }
    }

    /// One derived rule per (rule, translatable attribute, language).
    ///
    /// `required` stays `required` only with `force_overwrite`; otherwise it
    /// becomes `safe`, so a missing translation never blocks a save while the
    /// attribute stays assignable.
    pub fn project(&self, rules: &[Rule]) -> Vec<Rule> {
        let mut projected = Vec::new();
        for rule in rules {
            let kind = match &rule.kind {
                RuleKind::Required if !self.force_overwrite => RuleKind::Safe,
                kind => kind.clone(),
            };
            for attribute in rule.attributes.iter().filter(|a| self.is_translatable(a)) {
                for language in self.languages {
                    projected.push(Rule {
                        attributes: vec![NameScheme::virtual_attr(attribute, language.as_str())],
                        kind: kind.clone(),
                        on: rule.on.clone(),
                    });
                }
            }
        }
        projected
    }

    fn is_translatable(&self, attribute: &str) -> bool {
        self.fields.iter().any(|f| f == attribute)
    }
}
