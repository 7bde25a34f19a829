pub mod executor;
pub mod postgres_repositories;
pub mod repository;
pub mod utils;

pub use executor::Executor;
pub use postgres_repositories::PostgresRepositories;
pub use repository::translation::{ShadowRowRepositoryImpl, TranslationRepoFactory};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_helper;
