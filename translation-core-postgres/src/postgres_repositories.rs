use sqlx::PgPool;
use std::sync::Arc;
use translation_core_db::models::ShadowModel;

use crate::executor::Executor;
use crate::repository::translation::{TranslationRepoFactory, TranslationRepositories};

pub struct PostgresRepositories {
    pool: Arc<PgPool>,
    translation_factory: Arc<TranslationRepoFactory>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            translation_factory: TranslationRepoFactory::new(),
        }
    }

    pub fn pool(&self) -> &Arc<PgPool> {
        &self.pool
    }

    /// Begins a transaction for a new unit of work.
    pub async fn begin_session(&self) -> Result<Executor, sqlx::Error> {
        let tx = self.pool.begin().await?;
        Ok(Executor::new(tx))
    }

    /// Create the translation repositories of `models` sharing one transaction
    pub async fn create_translation_repositories(
        &self,
        models: &[Arc<ShadowModel>],
    ) -> Result<(Executor, TranslationRepositories), sqlx::Error> {
        let executor = self.begin_session().await?;
        let repos = self.translation_factory.build_all_repos(&executor, models);
        Ok((executor, repos))
    }
}
