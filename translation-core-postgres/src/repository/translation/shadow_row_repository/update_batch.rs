use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use translation_core_db::models::ShadowRow;
use translation_core_db::repository::update_batch::UpdateBatch;

use super::repo_impl::ShadowRowRepositoryImpl;
use crate::utils::quote_ident;

impl ShadowRowRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &ShadowRowRepositoryImpl,
        items: Vec<ShadowRow>,
    ) -> Result<Vec<ShadowRow>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let assignments: Vec<String> = std::iter::once(&repo.model.language_field)
            .chain(repo.model.columns.iter())
            .enumerate()
            .map(|(i, column)| format!("{} = ${}", quote_ident(column), i + 2))
            .collect();
        let query = format!(
            "UPDATE {} SET {} WHERE {} = $1",
            repo.table(),
            assignments.join(", "),
            quote_ident("id"),
        );

        // Acquire lock once and do all database operations
        {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

            for item in &items {
                let mut statement = sqlx::query(&query)
                    .bind(item.id)
                    .bind(item.language.as_str());
                for column in &repo.model.columns {
                    statement = statement.bind(item.column(column));
                }
                let result = statement.execute(&mut **transaction).await?;
                if result.rows_affected() == 0 {
                    return Err(format!("Shadow row {} does not exist", item.id).into());
                }
            }
        } // Transaction lock released here

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, ShadowRow> for ShadowRowRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<ShadowRow>,
    ) -> Result<Vec<ShadowRow>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use serial_test::serial;
    use translation_core_db::repository::create_batch::CreateBatch;
    use translation_core_db::repository::load_by_owner::LoadByOwner;
    use translation_core_db::repository::update_batch::UpdateBatch;
    use super::super::test_utils::test_utils::{create_test_post, create_test_shadow_row};

    #[tokio::test]
    #[serial]
    #[ignore = "requires a PostgreSQL database at DATABASE_URL"]
    async fn test_update_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repo = &ctx.shadow_row_repository;

        let owner_id = create_test_post(&ctx.executor).await?;
        let mut saved = repo
            .create_batch(vec![create_test_shadow_row(&ctx.model, owner_id, "fr", "Bonjour")])
            .await?;

        saved[0].set_column("localized_title", Some("Salut".to_string()));
        saved[0].set_column("localized_body", None);
        let updated = repo.update_batch(saved).await?;
        assert_eq!(updated.len(), 1);

        let loaded = repo.load_by_owner(owner_id, None).await?;
        assert_eq!(loaded[0].column("localized_title"), Some("Salut"));
        assert_eq!(loaded[0].column("localized_body"), None);

        Ok(())
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a PostgreSQL database at DATABASE_URL"]
    async fn test_update_batch_of_missing_row_fails() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let owner_id = uuid::Uuid::new_v4();
        let row = create_test_shadow_row(&ctx.model, owner_id, "en", "Hello");

        assert!(ctx.shadow_row_repository.update_batch(vec![row]).await.is_err());

        Ok(())
    }
}
