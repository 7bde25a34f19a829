use sqlx::Database;
use tracing::debug;
use translation_core_api::{LanguageContext, TranslationError, TranslationResult};

use super::TranslationSync;
use crate::models::Translatable;
use crate::naming::NameScheme;
use crate::repository::ShadowRowRepository;

impl<E: Translatable> TranslationSync<E> {
    /// Scopes the localized relation of `entity` to `language` for the next load.
    ///
    /// A language outside the configured set leaves the relation unchanged and
    /// returns `false`.
    pub fn localized(&self, entity: &mut E, language: &str) -> bool {
        let Some(language) = self.config.languages.get(language) else {
            debug!(
                entity = E::ENTITY_NAME,
                language,
                "Ignoring localized request for unconfigured language"
            );
            return false;
        };
        self.registrar()
            .register_localized(entity.translation_state_mut().relations_mut(), language);
        true
    }

    /// Fetches the row of the localized relation's language and overlays it
    /// onto the entity's fields.
    pub async fn load_localized<DB, R>(
        &self,
        entity: &mut E,
        repo: &R,
        ctx: &LanguageContext,
    ) -> TranslationResult<()>
    where
        DB: Database,
        R: ShadowRowRepository<DB> + ?Sized,
    {
        let language = entity
            .translation_state()
            .relations()
            .localized_language()
            .cloned()
            .unwrap_or_else(|| self.effective_language(ctx).clone());

        let rows = repo
            .load_by_owner(entity.get_id(), Some(&language))
            .await
            .map_err(TranslationError::Storage)?;

        let related = entity.translation_state_mut().related_mut();
        related.clear();
        related.set_localized(rows.into_iter().next());
        self.after_find(entity, ctx)
    }

    /// Fetches every language's row and exposes them as virtual attributes.
    pub async fn load_internationalized<DB, R>(
        &self,
        entity: &mut E,
        repo: &R,
        ctx: &LanguageContext,
    ) -> TranslationResult<()>
    where
        DB: Database,
        R: ShadowRowRepository<DB> + ?Sized,
    {
        let rows = repo
            .load_by_owner(entity.get_id(), None)
            .await
            .map_err(TranslationError::Storage)?;

        let related = entity.translation_state_mut().related_mut();
        related.clear();
        related.set_internationalized(rows);
        self.after_find(entity, ctx)
    }

    /// Applies whatever relations were fetched for `entity`.
    ///
    /// Internationalized rows take precedence over a localized row. Without
    /// either, the entity keeps its stored field values. The fetched rows are
    /// consumed, so a later call without a new fetch overlays nothing.
    pub fn after_find(&self, entity: &mut E, ctx: &LanguageContext) -> TranslationResult<()> {
        let related = std::mem::take(entity.translation_state_mut().related_mut());

        if let Some(rows) = related.internationalized() {
            let store = entity.translation_state_mut().attributes_mut();
            for language in &self.config.languages {
                let row = rows.get(language);
                for field in &self.config.translation_attributes {
                    let value = row
                        .and_then(|r| r.column(&self.scheme.shadow_column(field)))
                        .map(str::to_string);
                    store.set(NameScheme::virtual_attr(field, language.as_str()), value);
                }
            }
            debug!(
                entity = E::ENTITY_NAME,
                fetched = rows.len(),
                "Loaded internationalized translations"
            );
        } else if let Some(row) = related.localized() {
            if let Some(row) = row {
                for field in &self.config.translation_attributes {
                    let value = row.column(&self.scheme.shadow_column(field));
                    let present = value.is_some_and(|v| !v.is_empty());
                    if present || self.config.force_overwrite {
                        entity.set_field(field, value.map(str::to_string))?;
                    }
                }
            }
            self.restore_localized(entity, ctx);
        }

        Ok(())
    }

    /// Points the localized relation back at the context language after a
    /// one-off override.
    fn restore_localized(&self, entity: &mut E, ctx: &LanguageContext) {
        let current = self.effective_language(ctx);
        let relations = entity.translation_state_mut().relations_mut();
        if relations.localized_language() != Some(current) {
            self.registrar().register_localized(relations, current);
        }
    }
}
