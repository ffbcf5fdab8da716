pub mod calculations;
pub mod models;
pub mod policy;
pub mod source;

pub use models::*;
pub use policy::{PolicyError, PolicySet, SlabPolicy};
pub use source::{PolicySource, SourceConfig, SourceError, SourceFactory, SourceRegistry};
