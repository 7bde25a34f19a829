use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use translation_core_db::repository::delete_by_owner::DeleteByOwner;
use uuid::Uuid;

use super::repo_impl::ShadowRowRepositoryImpl;
use crate::utils::quote_ident;

impl ShadowRowRepositoryImpl {
    pub(super) async fn delete_by_owner_impl(
        repo: &ShadowRowRepositoryImpl,
        owner_ids: &[Uuid],
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        if owner_ids.is_empty() {
            return Ok(0);
        }

        let query = format!(
            "DELETE FROM {} WHERE {} = ANY($1)",
            repo.table(),
            quote_ident(&repo.model.foreign_key),
        );

        let rows_affected = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            let result = sqlx::query(&query).bind(owner_ids).execute(&mut **transaction).await?;
            result.rows_affected() as usize
        }; // Transaction lock released here

        Ok(rows_affected)
    }
}

#[async_trait]
impl DeleteByOwner<Postgres> for ShadowRowRepositoryImpl {
    async fn delete_by_owner(
        &self,
        owner_ids: &[Uuid],
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        Self::delete_by_owner_impl(self, owner_ids).await
    }
}
