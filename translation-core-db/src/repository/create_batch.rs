use async_trait::async_trait;
use sqlx::Database;

use crate::models::entity::Identifiable;

/// Generic repository trait for creating multiple rows in a batch
///
/// Returns saved items with any generated fields populated.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The row type that must implement Identifiable trait
#[async_trait]
pub trait CreateBatch<DB: Database, T: Identifiable>: Send + Sync {
    /// Insert multiple items
    ///
    /// # Arguments
    /// * `items` - A vector of rows to create
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The created rows
    /// * `Err` - An error if the rows could not be written
    async fn create_batch(
        &self,
        items: Vec<T>,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
