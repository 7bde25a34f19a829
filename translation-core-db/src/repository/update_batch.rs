use async_trait::async_trait;
use sqlx::Database;

use crate::models::entity::Identifiable;

/// Generic repository trait for updating multiple rows in a batch
///
/// Rows are matched by their `id`; writes are last-write-wins.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The row type that must implement Identifiable trait
#[async_trait]
pub trait UpdateBatch<DB: Database, T: Identifiable>: Send + Sync {
    /// Update multiple items
    ///
    /// # Arguments
    /// * `items` - A vector of rows to update
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The updated rows
    /// * `Err` - An error if the rows could not be written
    async fn update_batch(
        &self,
        items: Vec<T>,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
