use thiserror::Error;

use crate::language::LanguageCode;
use crate::rule::RuleViolation;

/// Boxed error type returned by storage collaborators.
pub type StorageError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum TranslationError {
    /// Invalid or incomplete configuration, raised when the behavior is attached.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Raised by an entity's native attribute resolution. Passed through unchanged
    /// when the name is not a virtual attribute either.
    #[error("Unknown attribute '{attribute}' on {entity}")]
    UnknownAttribute { entity: String, attribute: String },

    #[error("Validation failed: {}", format_violations(.0))]
    Validation(Vec<RuleViolation>),

    #[error("Storage error: {0}")]
    Storage(#[source] StorageError),

    /// One language's shadow row failed to persist. Rows listed in `committed`
    /// were written before the failure and are not rolled back here.
    #[error("Shadow row for language '{failed}' failed to save after {} committed: {source}", .committed.len())]
    PartialSave {
        committed: Vec<LanguageCode>,
        failed: LanguageCode,
        #[source]
        source: StorageError,
    },

    #[error("Failed to delete shadow rows of {owner}: {source}")]
    DeleteCascade {
        owner: String,
        #[source]
        source: StorageError,
    },
}

impl TranslationError {
    pub fn unknown_attribute(entity: impl Into<String>, attribute: impl Into<String>) -> Self {
        TranslationError::UnknownAttribute {
            entity: entity.into(),
            attribute: attribute.into(),
        }
    }

    pub fn is_unknown_attribute(&self) -> bool {
        matches!(self, TranslationError::UnknownAttribute { .. })
    }
}

fn format_violations(violations: &[RuleViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type TranslationResult<T> = Result<T, TranslationError>;
