use std::collections::HashMap;
use std::sync::Arc;
use translation_core_db::models::ShadowModel;

use super::ShadowRowRepositoryImpl;
use crate::executor::Executor;

/// Factory for creating shadow row repositories bound to a session
pub struct TranslationRepoFactory {}

impl TranslationRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }

    /// Build a ShadowRowRepository for one shadow model with the given executor
    pub fn build_shadow_row_repo(
        &self,
        executor: &Executor,
        model: Arc<ShadowModel>,
    ) -> Arc<ShadowRowRepositoryImpl> {
        Arc::new(ShadowRowRepositoryImpl::new(executor.clone(), model))
    }

    /// Build one repository per shadow model, all sharing the executor
    pub fn build_all_repos(
        &self,
        executor: &Executor,
        models: &[Arc<ShadowModel>],
    ) -> TranslationRepositories {
        TranslationRepositories {
            shadow_row_repositories: models
                .iter()
                .map(|model| {
                    (
                        model.name.clone(),
                        self.build_shadow_row_repo(executor, model.clone()),
                    )
                })
                .collect(),
        }
    }
}

/// Shadow row repositories of one session, keyed by shadow model name
pub struct TranslationRepositories {
    pub shadow_row_repositories: HashMap<String, Arc<ShadowRowRepositoryImpl>>,
}

impl TranslationRepositories {
    pub fn shadow_rows(&self, model_name: &str) -> Option<&Arc<ShadowRowRepositoryImpl>> {
        self.shadow_row_repositories.get(model_name)
    }
}
