use async_trait::async_trait;
use sqlx::Database;
use translation_core_api::LanguageCode;
use uuid::Uuid;

use crate::models::entity::Identifiable;

/// Generic repository trait for loading the rows that belong to one owner
///
/// This is the relationship loader behind the localized and internationalized
/// relations: rows are selected by foreign key and, optionally, by language.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The row type that must implement Identifiable trait
///
/// # Example
/// ```ignore
/// impl LoadByOwner<Postgres, ShadowRow> for ShadowRowRepositoryImpl {
///     async fn load_by_owner(&self, owner_id: Uuid, language: Option<&LanguageCode>) -> Result<Vec<ShadowRow>, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait LoadByOwner<DB: Database, T: Identifiable>: Send + Sync {
    /// Load every row of an owner
    ///
    /// # Arguments
    /// * `owner_id` - The UUID of the owning entity
    /// * `language` - Restricts the result to one language when set
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The matching rows, possibly empty
    /// * `Err` - An error if the query could not be executed
    async fn load_by_owner(
        &self,
        owner_id: Uuid,
        language: Option<&LanguageCode>,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
