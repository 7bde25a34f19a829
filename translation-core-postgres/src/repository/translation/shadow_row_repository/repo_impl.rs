use std::sync::Arc;
use translation_core_db::models::ShadowModel;

use crate::executor::Executor;
use crate::utils::quote_ident;

/// Shadow rows of one [`ShadowModel`], stored in its table.
pub struct ShadowRowRepositoryImpl {
    pub executor: Executor,
    pub model: Arc<ShadowModel>,
}

impl ShadowRowRepositoryImpl {
    pub fn new(executor: Executor, model: Arc<ShadowModel>) -> Self {
        Self { executor, model }
    }

    pub(super) fn table(&self) -> String {
        quote_ident(&self.model.table_name)
    }

    /// `id`, foreign key, language, then the value columns, quoted.
    pub(super) fn all_columns(&self) -> Vec<String> {
        let mut columns = vec![
            quote_ident("id"),
            quote_ident(&self.model.foreign_key),
            quote_ident(&self.model.language_field),
        ];
        columns.extend(self.model.columns.iter().map(|c| quote_ident(c)));
        columns
    }
}
