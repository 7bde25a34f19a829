use translation_core_api::TranslationResult;

use crate::models::Translatable;
use crate::naming::NameScheme;

/// Attribute access that falls back from an entity's native fields to its
/// virtual translation attributes.
///
/// Native fields always win. A name that is neither native nor a virtual
/// attribute yields the entity's own `UnknownAttribute` error, unchanged.
pub trait PropertyBridge: Translatable {
    fn attribute(&self, name: &str) -> TranslationResult<Option<String>> {
        if self.has_field(name) {
            return self.field(name);
        }
        let store = self.translation_state().attributes();
        if store.contains(name) {
            return Ok(store.get(name).map(str::to_string));
        }
        self.field(name)
    }

    fn set_attribute(&mut self, name: &str, value: Option<String>) -> TranslationResult<()> {
        if self.has_field(name) {
            return self.set_field(name, value);
        }
        let store = self.translation_state_mut().attributes_mut();
        if store.contains(name) {
            store.set(name, value);
            return Ok(());
        }
        self.set_field(name, value)
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.has_field(name) || self.translation_state().attributes().contains(name)
    }

    fn can_read_attribute(&self, name: &str) -> bool {
        self.can_read_field(name) || self.translation_state().attributes().contains(name)
    }

    fn can_write_attribute(&self, name: &str) -> bool {
        self.can_write_field(name) || self.translation_state().attributes().contains(name)
    }

    /// Virtual value of `field` in `language`; `None` when missing.
    fn translation(&self, field: &str, language: &str) -> Option<&str> {
        self.translation_state()
            .attributes()
            .get(&NameScheme::virtual_attr(field, language))
    }

    /// Sets the virtual value of `field` in `language`.
    ///
    /// A language outside the configuration has no virtual attribute, so the
    /// write falls through to the entity like any other unknown name.
    fn set_translation(
        &mut self,
        field: &str,
        language: &str,
        value: Option<String>,
    ) -> TranslationResult<()> {
        let name = NameScheme::virtual_attr(field, language);
        let store = self.translation_state_mut().attributes_mut();
        if store.contains(&name) {
            store.set(name, value);
            return Ok(());
        }
        self.set_field(&name, value)
    }
}

impl<E: Translatable> PropertyBridge for E {}
