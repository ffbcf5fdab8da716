use std::collections::HashMap;

use thiserror::Error;

use crate::policy::{PolicyError, PolicySet};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("policy tables not found: {0}")]
    NotFound(String),

    #[error("failed to read policy tables: {0}")]
    Read(String),

    #[error(transparent)]
    Policy(#[from] PolicyError),
}

/// Backend-agnostic source configuration.
///
/// `backend` must match the [`SourceFactory::backend_name`] of a registered
/// factory. `location` is passed through to that factory unchanged; its
/// meaning is backend-specific.
///
/// | backend   | location examples              |
/// |-----------|--------------------------------|
/// | `builtin` | ignored                        |
/// | `csv`     | `slab-data/data/fy2024-25`     |
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SourceConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"csv"`).
    pub backend: String,
    /// Opaque value forwarded to the factory's `create` method.
    #[serde(default)]
    pub location: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            backend: "builtin".to_string(),
            location: String::new(),
        }
    }
}

/// Anything that can produce a validated [`PolicySet`].
pub trait PolicySource: Send + Sync {
    fn load(&self) -> Result<PolicySet, SourceError>;
}

/// One implementation per table backend. Each backend exports a unit struct
/// that implements this trait and is registered with a [`SourceRegistry`].
pub trait SourceFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    fn create(
        &self,
        config: &SourceConfig,
    ) -> Result<Box<dyn PolicySource>, SourceError>;
}

/// Registry of [`SourceFactory`] instances, keyed by backend name.
pub struct SourceRegistry {
    factories: HashMap<&'static str, Box<dyn SourceFactory>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory, replacing any with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn SourceFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend`.
    ///
    /// # Errors
    /// * [`SourceError::Configuration`] when no factory is registered for the
    ///   requested backend name.
    /// * Any error the chosen factory itself returns.
    pub fn create(
        &self,
        config: &SourceConfig,
    ) -> Result<Box<dyn PolicySource>, SourceError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                SourceError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config)
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
