use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

/// Generic repository trait for bulk-deleting the rows of one or more owners
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
#[async_trait]
pub trait DeleteByOwner<DB: Database>: Send + Sync {
    /// Delete every row whose foreign key is one of `owner_ids`
    ///
    /// # Returns
    /// * `Ok(usize)` - The number of rows deleted
    /// * `Err` - An error if the delete could not be executed
    async fn delete_by_owner(
        &self,
        owner_ids: &[Uuid],
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>>;
}
