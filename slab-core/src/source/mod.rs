//! Where policy tables come from.
//!
//! Backends register a [`SourceFactory`] with a [`SourceRegistry`]; callers
//! pick one by name through [`SourceConfig`] and receive a [`PolicySource`].

pub mod builtin;
pub mod registry;

pub use builtin::{BuiltinSource, BuiltinSourceFactory};
pub use registry::{PolicySource, SourceConfig, SourceError, SourceFactory, SourceRegistry};
