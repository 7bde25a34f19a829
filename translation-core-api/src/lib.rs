pub mod config;
pub mod error;
pub mod language;
pub mod rule;

pub use config::*;
pub use error::*;
pub use language::*;
pub use rule::*;
