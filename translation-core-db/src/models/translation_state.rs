use super::attribute_store::AttributeStore;
use crate::relation::{RelatedRows, RelationSet};

/// Per-instance translation data owned by a primary entity.
#[derive(Debug, Clone, Default)]
pub struct TranslationState {
    attributes: AttributeStore,
    relations: RelationSet,
    related: RelatedRows,
}

impl TranslationState {
    pub fn new(attributes: AttributeStore, relations: RelationSet) -> Self {
        Self {
            attributes,
            relations,
            related: RelatedRows::default(),
        }
    }

    pub fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeStore {
        &mut self.attributes
    }

    pub fn relations(&self) -> &RelationSet {
        &self.relations
    }

    pub fn relations_mut(&mut self) -> &mut RelationSet {
        &mut self.relations
    }

    /// Shadow rows fetched for this instance by the last load.
    pub fn related(&self) -> &RelatedRows {
        &self.related
    }

    pub fn related_mut(&mut self) -> &mut RelatedRows {
        &mut self.related
    }
}
