pub mod repo_impl;
pub mod create_batch;
pub mod delete_by_owner;
pub mod load_by_owner;
pub mod update_batch;

#[cfg(test)]
pub mod test_utils;

pub use repo_impl::ShadowRowRepositoryImpl;
