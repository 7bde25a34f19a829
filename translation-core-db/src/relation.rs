use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;
use translation_core_api::{LanguageCode, ResolvedConfig};

use crate::models::{ShadowModel, ShadowRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// At most one related row.
    HasOne,
    /// Any number of related rows, addressed by the index column.
    HasMany,
}

/// A named relationship from a primary entity to its shadow rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationDef {
    pub name: String,
    pub kind: RelationKind,
    pub model: Arc<ShadowModel>,
    /// Column of the shadow table referencing the owner.
    pub foreign_key: String,
    /// Column the fetched rows are keyed by.
    pub index_by: String,
    /// Restricts the relation to one language when set.
    pub language: Option<LanguageCode>,
}

/// Relations registered on one entity instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationSet {
    localized: Option<RelationDef>,
    internationalized: Option<RelationDef>,
}

impl RelationSet {
    pub fn localized(&self) -> Option<&RelationDef> {
        self.localized.as_ref()
    }

    pub fn internationalized(&self) -> Option<&RelationDef> {
        self.internationalized.as_ref()
    }

    /// Language the localized relation is currently scoped to.
    pub fn localized_language(&self) -> Option<&LanguageCode> {
        self.localized.as_ref().and_then(|r| r.language.as_ref())
    }

    pub fn get(&self, name: &str) -> Option<&RelationDef> {
        [self.localized.as_ref(), self.internationalized.as_ref()]
            .into_iter()
            .flatten()
            .find(|r| r.name == name)
    }
}

/// Shadow rows fetched through the relations, held until `after_find` consumes them.
///
/// `None` means the relation was not fetched at all, as opposed to fetched
/// with no rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelatedRows {
    localized: Option<Option<ShadowRow>>,
    internationalized: Option<BTreeMap<LanguageCode, ShadowRow>>,
}

impl RelatedRows {
    pub fn localized(&self) -> Option<Option<&ShadowRow>> {
        self.localized.as_ref().map(Option::as_ref)
    }

    pub fn internationalized(&self) -> Option<&BTreeMap<LanguageCode, ShadowRow>> {
        self.internationalized.as_ref()
    }

    pub fn set_localized(&mut self, row: Option<ShadowRow>) {
        self.localized = Some(row);
    }

    /// Stores rows indexed by their language; a later duplicate replaces an earlier one.
    pub fn set_internationalized(&mut self, rows: impl IntoIterator<Item = ShadowRow>) {
        self.internationalized = Some(rows.into_iter().map(|r| (r.language.clone(), r)).collect());
    }

    pub fn clear(&mut self) {
        self.localized = None;
        self.internationalized = None;
    }
}

/// Registers the localized and internationalized relations on an entity.
pub struct RelationRegistrar<'a> {
    config: &'a ResolvedConfig,
    model: &'a Arc<ShadowModel>,
}

impl<'a> RelationRegistrar<'a> {
    pub fn new(config: &'a ResolvedConfig, model: &'a Arc<ShadowModel>) -> Self {
        Self { config, model }
    }

    /// Defines or replaces the single-row relation scoped to `language`.
    pub fn register_localized(&self, relations: &mut RelationSet, language: &LanguageCode) {
        let previous = relations.localized_language().cloned();
        relations.localized = Some(RelationDef {
            name: self.config.localized_relation.clone(),
            kind: RelationKind::HasOne,
            model: self.model.clone(),
            foreign_key: self.model.foreign_key.clone(),
            index_by: self.model.language_field.clone(),
            language: Some(language.clone()),
        });
        debug!(
            relation = %self.config.localized_relation,
            from = ?previous.as_ref().map(LanguageCode::as_str),
            to = %language,
            "Registered localized relation"
        );
    }

    /// Defines the multi-row relation over every language. Leaves an existing
    /// definition untouched.
    pub fn register_internationalized(&self, relations: &mut RelationSet) {
        if relations.internationalized.is_some() {
            return;
        }
        relations.internationalized = Some(RelationDef {
            name: self.config.internationalized_relation.clone(),
            kind: RelationKind::HasMany,
            model: self.model.clone(),
            foreign_key: self.model.foreign_key.clone(),
            index_by: self.model.language_field.clone(),
            language: None,
        });
    }
}
