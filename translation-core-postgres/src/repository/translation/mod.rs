pub mod factory;
pub mod shadow_row_repository;

pub use factory::{TranslationRepoFactory, TranslationRepositories};
pub use shadow_row_repository::ShadowRowRepositoryImpl;
