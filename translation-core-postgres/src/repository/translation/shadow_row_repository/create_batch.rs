use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use tracing::debug;
use translation_core_db::models::ShadowRow;
use translation_core_db::repository::create_batch::CreateBatch;

use super::repo_impl::ShadowRowRepositoryImpl;

impl ShadowRowRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &ShadowRowRepositoryImpl,
        items: Vec<ShadowRow>,
    ) -> Result<Vec<ShadowRow>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let columns = repo.all_columns();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${i}")).collect();
        let query = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            repo.table(),
            columns.join(", "),
            placeholders.join(", "),
        );

        // Acquire lock once and do all database operations
        {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

            for item in &items {
                let mut statement = sqlx::query(&query)
                    .bind(item.id)
                    .bind(item.owner_id)
                    .bind(item.language.as_str());
                for column in &repo.model.columns {
                    statement = statement.bind(item.column(column));
                }
                statement.execute(&mut **transaction).await?;
            }
        } // Transaction lock released here

        debug!(table = %repo.model.table_name, count = items.len(), "Inserted shadow rows");
        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, ShadowRow> for ShadowRowRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ShadowRow>,
    ) -> Result<Vec<ShadowRow>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use serial_test::serial;
    use translation_core_db::repository::create_batch::CreateBatch;
    use super::super::test_utils::test_utils::{create_test_post, create_test_shadow_row};

    #[tokio::test]
    #[serial]
    #[ignore = "requires a PostgreSQL database at DATABASE_URL"]
    async fn test_create_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repo = &ctx.shadow_row_repository;

        let owner_id = create_test_post(&ctx.executor).await?;
        let saved = repo
            .create_batch(vec![
                create_test_shadow_row(&ctx.model, owner_id, "en", "Hello"),
                create_test_shadow_row(&ctx.model, owner_id, "fr", "Bonjour"),
            ])
            .await?;

        assert_eq!(saved.len(), 2);

        Ok(())
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a PostgreSQL database at DATABASE_URL"]
    async fn test_create_batch_rejects_second_row_per_language() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repo = &ctx.shadow_row_repository;

        let owner_id = create_test_post(&ctx.executor).await?;
        repo.create_batch(vec![create_test_shadow_row(&ctx.model, owner_id, "en", "Hello")])
            .await?;
        let result = repo
            .create_batch(vec![create_test_shadow_row(&ctx.model, owner_id, "en", "Hi")])
            .await;

        assert!(result.is_err());

        Ok(())
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a PostgreSQL database at DATABASE_URL"]
    async fn test_create_batch_empty() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let saved = ctx.shadow_row_repository.create_batch(Vec::new()).await?;

        assert_eq!(saved.len(), 0);

        Ok(())
    }
}
