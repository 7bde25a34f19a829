use tracing::debug;
use uuid::Uuid;

use super::TranslationSync;
use crate::models::Translatable;
use crate::naming::NameScheme;

impl<E: Translatable> TranslationSync<E> {
    /// Seeds every virtual attribute with the empty default of a transient
    /// shadow row. Only runs in a configured create scenario.
    pub fn after_construct(&self, entity: &mut E) {
        if !self.config.is_create_scenario(entity.scenario()) {
            return;
        }

        let template = self
            .model
            .new_row(Uuid::nil(), self.config.default_language.clone());
        let store = entity.translation_state_mut().attributes_mut();
        for language in &self.config.languages {
            for field in &self.config.translation_attributes {
                let value = template
                    .column(&self.scheme.shadow_column(field))
                    .map(str::to_string);
                store.set(NameScheme::virtual_attr(field, language.as_str()), value);
            }
        }
        debug!(
            entity = E::ENTITY_NAME,
            seeded = store.len(),
            "Seeded virtual attributes for new entity"
        );
    }
}
