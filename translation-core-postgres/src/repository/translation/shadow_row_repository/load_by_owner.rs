use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use translation_core_api::LanguageCode;
use translation_core_db::models::ShadowRow;
use translation_core_db::repository::load_by_owner::LoadByOwner;
use uuid::Uuid;

use super::repo_impl::ShadowRowRepositoryImpl;
use crate::utils::{quote_ident, TryFromModelRow};

impl ShadowRowRepositoryImpl {
    pub(super) async fn load_by_owner_impl(
        repo: &ShadowRowRepositoryImpl,
        owner_id: Uuid,
        language: Option<&LanguageCode>,
    ) -> Result<Vec<ShadowRow>, Box<dyn Error + Send + Sync>> {
        let mut query = format!(
            "SELECT {} FROM {} WHERE {} = $1",
            repo.all_columns().join(", "),
            repo.table(),
            quote_ident(&repo.model.foreign_key),
        );
        if language.is_some() {
            query.push_str(&format!(" AND {} = $2", quote_ident(&repo.model.language_field)));
        }

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            let mut statement = sqlx::query(&query).bind(owner_id);
            if let Some(language) = language {
                statement = statement.bind(language.as_str());
            }
            statement.fetch_all(&mut **transaction).await?
        };

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(ShadowRow::try_from_model_row(&row, &repo.model)?);
        }
        Ok(items)
    }
}

#[async_trait]
impl LoadByOwner<Postgres, ShadowRow> for ShadowRowRepositoryImpl {
    async fn load_by_owner(
        &self,
        owner_id: Uuid,
        language: Option<&LanguageCode>,
    ) -> Result<Vec<ShadowRow>, Box<dyn Error + Send + Sync>> {
        Self::load_by_owner_impl(self, owner_id, language).await
    }
}
