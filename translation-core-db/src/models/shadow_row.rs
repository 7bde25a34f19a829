use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use translation_core_api::LanguageCode;
use uuid::Uuid;

use super::entity::Identifiable;

/// # Documentation
/// One row of a shadow table: the translated values of one owner entity in
/// one language. At most one row exists per (owner_id, language).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowRow {
    pub id: Uuid,

    /// Primary key of the owning entity
    pub owner_id: Uuid,

    pub language: LanguageCode,

    /// Translated values keyed by shadow column name (`<prefix><field>`)
    pub columns: BTreeMap<String, Option<String>>,
}

impl ShadowRow {
    pub fn new(owner_id: Uuid, language: LanguageCode) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            language,
            columns: BTreeMap::new(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&str> {
        self.columns.get(name).and_then(|v| v.as_deref())
    }

    pub fn set_column(&mut self, name: impl Into<String>, value: Option<String>) {
        self.columns.insert(name.into(), value);
    }
}

impl Identifiable for ShadowRow {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
