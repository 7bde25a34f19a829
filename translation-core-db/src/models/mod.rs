pub mod attribute_store;
pub mod entity;
pub mod shadow_model;
pub mod shadow_row;
pub mod translation_state;

// Re-exports
pub use attribute_store::*;
pub use entity::*;
pub use shadow_model::*;
pub use shadow_row::*;
pub use translation_state::*;
