use sqlx::Database;
use tracing::info;
use translation_core_api::{TranslationError, TranslationResult};

use super::TranslationSync;
use crate::models::Translatable;
use crate::repository::ShadowRowRepository;

impl<E: Translatable> TranslationSync<E> {
    /// Bulk-deletes the entity's shadow rows when `force_delete` is set.
    ///
    /// Returns the number of rows removed. Any failure aborts the owning delete.
    pub async fn after_delete<DB, R>(&self, entity: &E, repo: &R) -> TranslationResult<usize>
    where
        DB: Database,
        R: ShadowRowRepository<DB> + ?Sized,
    {
        if !self.config.force_delete {
            return Ok(0);
        }

        let owner_id = entity.get_id();
        let deleted = repo
            .delete_by_owner(&[owner_id])
            .await
            .map_err(|source| TranslationError::DeleteCascade {
                owner: format!("{} {owner_id}", E::ENTITY_NAME),
                source,
            })?;
        info!(
            entity = E::ENTITY_NAME,
            %owner_id,
            deleted,
            table = %self.model.table_name,
            "Deleted shadow rows"
        );
        Ok(deleted)
    }
}
