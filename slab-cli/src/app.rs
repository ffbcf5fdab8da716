use slab_core::source::BuiltinSourceFactory;
use slab_core::{PolicySet, SourceConfig, SourceError, SourceRegistry};
use slab_data::CsvSourceFactory;
use tracing::{debug, info};

/// Build a [`SourceRegistry`] with every available table backend.
pub fn build_registry() -> SourceRegistry {
    let mut registry = SourceRegistry::new();
    registry.register(Box::new(BuiltinSourceFactory));
    registry.register(Box::new(CsvSourceFactory));
    registry
}

/// Resolve `config` against the registry and load its tables.
pub fn load_policies(
    registry: &SourceRegistry,
    config: &SourceConfig,
) -> Result<PolicySet, SourceError> {
    debug!(backend = %config.backend, location = %config.location, "opening policy source");
    let source = registry.create(config)?;
    let set = source.load()?;
    info!(version = %set.version, backend = %config.backend, "policy tables ready");
    Ok(set)
}
