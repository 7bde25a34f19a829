pub mod create_batch;
pub mod delete_by_owner;
pub mod load_by_owner;
pub mod update_batch;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

// Re-exports
pub use create_batch::*;
pub use delete_by_owner::*;
pub use load_by_owner::*;
pub use update_batch::*;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::*;

use sqlx::Database;

use crate::models::ShadowRow;

/// Everything the translation engine needs from a shadow row store.
pub trait ShadowRowRepository<DB: Database>:
    LoadByOwner<DB, ShadowRow> + CreateBatch<DB, ShadowRow> + UpdateBatch<DB, ShadowRow> + DeleteByOwner<DB>
{
}

impl<DB, R> ShadowRowRepository<DB> for R
where
    DB: Database,
    R: LoadByOwner<DB, ShadowRow>
        + CreateBatch<DB, ShadowRow>
        + UpdateBatch<DB, ShadowRow>
        + DeleteByOwner<DB>
        + ?Sized,
{
}
