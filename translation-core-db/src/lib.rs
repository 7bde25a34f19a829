pub mod bridge;
pub mod models;
pub mod naming;
pub mod projection;
pub mod relation;
pub mod repository;
pub mod sync;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-exports
pub use bridge::PropertyBridge;
pub use models::*;
pub use naming::NameScheme;
pub use projection::RuleProjector;
pub use relation::{RelatedRows, RelationDef, RelationKind, RelationRegistrar, RelationSet};
pub use repository::*;
pub use sync::TranslationSync;
