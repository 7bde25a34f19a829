use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use validator::{ValidateEmail, ValidateLength};

use crate::error::{TranslationError, TranslationResult};

/// Kind of a field-level validation rule, with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleKind {
    Required,
    /// Marks an attribute as assignable without checking it.
    Safe,
    Length {
        min: Option<u64>,
        max: Option<u64>,
    },
    Email,
    /// A rule executed by the host framework; carried along but never checked here.
    Custom {
        name: String,
        #[serde(default)]
        params: BTreeMap<String, serde_json::Value>,
    },
}

impl RuleKind {
    pub fn name(&self) -> &str {
        match self {
            RuleKind::Required => "required",
            RuleKind::Safe => "safe",
            RuleKind::Length { .. } => "length",
            RuleKind::Email => "email",
            RuleKind::Custom { name, .. } => name,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validation rule bound to one or more attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub attributes: Vec<String>,
    #[serde(flatten)]
    pub kind: RuleKind,
    /// Scenarios the rule applies to. Empty means every scenario.
    #[serde(default)]
    pub on: Vec<String>,
}

impl Rule {
    pub fn new<I, S>(attributes: I, kind: RuleKind) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attributes: attributes.into_iter().map(Into::into).collect(),
            kind,
            on: Vec::new(),
        }
    }

    pub fn on<I, S>(mut self, scenarios: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.on = scenarios.into_iter().map(Into::into).collect();
        self
    }

    pub fn applies_to(&self, scenario: &str) -> bool {
        self.on.is_empty() || self.on.iter().any(|s| s == scenario)
    }

    /// Checks one attribute value. Blank values only fail `required`.
    pub fn check(&self, value: Option<&str>) -> bool {
        let value = value.filter(|v| !v.trim().is_empty());
        match (&self.kind, value) {
            (RuleKind::Required, value) => value.is_some(),
            (_, None) => true,
            (RuleKind::Safe, _) | (RuleKind::Custom { .. }, _) => true,
            (RuleKind::Length { min, max }, Some(v)) => v.validate_length(*min, *max, None),
            (RuleKind::Email, Some(v)) => v.validate_email(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleViolation {
    pub attribute: String,
    pub rule: RuleKind,
}

impl RuleViolation {
    pub fn new(attribute: impl Into<String>, rule: RuleKind) -> Self {
        Self {
            attribute: attribute.into(),
            rule,
        }
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.attribute, self.rule)
    }
}

/// Rules of an entity, including any registered for derived attribute names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn add(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn extend(&mut self, rules: impl IntoIterator<Item = Rule>) {
        self.rules.extend(rules);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rules registered against `attribute`.
    pub fn for_attribute<'a>(&'a self, attribute: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules
            .iter()
            .filter(move |r| r.attributes.iter().any(|a| a == attribute))
    }

    /// Runs every rule applicable to `scenario`, reading values through `lookup`.
    pub fn validate<F>(&self, scenario: &str, lookup: F) -> TranslationResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut violations = Vec::new();
        for rule in self.rules.iter().filter(|r| r.applies_to(scenario)) {
            for attribute in &rule.attributes {
                let value = lookup(attribute);
                if !rule.check(value.as_deref()) {
                    violations.push(RuleViolation::new(attribute.clone(), rule.kind.clone()));
                }
            }
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(TranslationError::Validation(violations))
        }
    }
}
