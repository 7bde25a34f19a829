use translation_core_api::{Rule, TranslationResult};
use uuid::Uuid;

use super::translation_state::TranslationState;

/// Trait for entities that can be uniquely identified by a UUID
pub trait Identifiable {
    /// Returns the unique identifier of the entity
    fn get_id(&self) -> Uuid;
}

/// A primary entity carrying translatable fields.
///
/// Implementors expose their native fields by name and own a
/// [`TranslationState`] that the translation engine reads and writes.
/// Native resolution must report unknown names with
/// `TranslationError::UnknownAttribute`.
pub trait Translatable: Identifiable {
    /// Entity name used to derive relation and shadow model names, e.g. `Post`.
    const ENTITY_NAME: &'static str;

    /// Backing table of the entity, e.g. `post`.
    const TABLE_NAME: &'static str;

    /// Field-level rules configured on the entity.
    fn rules() -> Vec<Rule>;

    /// True until the entity has been persisted for the first time.
    fn is_new_record(&self) -> bool;

    /// Active scenario, e.g. `create` or `update`.
    fn scenario(&self) -> &str;

    fn has_field(&self, name: &str) -> bool;

    fn field(&self, name: &str) -> TranslationResult<Option<String>>;

    fn set_field(&mut self, name: &str, value: Option<String>) -> TranslationResult<()>;

    fn can_read_field(&self, name: &str) -> bool {
        self.has_field(name)
    }

    fn can_write_field(&self, name: &str) -> bool {
        self.has_field(name)
    }

    fn translation_state(&self) -> &TranslationState;

    fn translation_state_mut(&mut self) -> &mut TranslationState;
}
