#[cfg(test)]
pub mod test_utils {
    use crate::executor::Executor;
    use translation_core_db::models::{ShadowModel, ShadowRow};
    use uuid::Uuid;

    /// Insert a bare `post` row so shadow rows can reference it
    pub async fn create_test_post(executor: &Executor) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>> {
        let id = Uuid::new_v4();
        let mut tx = executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        sqlx::query("INSERT INTO post (id, title, author) VALUES ($1, $2, $3)")
            .bind(id)
            .bind("Test Post")
            .bind("editor@example.com")
            .execute(&mut **transaction)
            .await?;
        Ok(id)
    }

    /// Create a shadow row with a title and an empty body
    pub fn create_test_shadow_row(model: &ShadowModel, owner_id: Uuid, language: &str, title: &str) -> ShadowRow {
        let mut row = model.new_row(owner_id, language.parse().unwrap());
        row.set_column("localized_title", Some(title.to_string()));
        row
    }
}
