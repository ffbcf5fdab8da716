use tracing::info;

use super::registry::{PolicySource, SourceConfig, SourceError, SourceFactory};
use crate::policy::PolicySet;

/// Serves the tables compiled into the crate.
pub struct BuiltinSource;

impl PolicySource for BuiltinSource {
    fn load(&self) -> Result<PolicySet, SourceError> {
        let set = PolicySet::builtin()?;
        info!(version = %set.version, "loaded built-in policy tables");
        Ok(set)
    }
}

/// [`SourceFactory`] for the `"builtin"` backend. The configured location is
/// ignored.
pub struct BuiltinSourceFactory;

impl SourceFactory for BuiltinSourceFactory {
    fn backend_name(&self) -> &'static str {
        "builtin"
    }

    fn create(
        &self,
        _config: &SourceConfig,
    ) -> Result<Box<dyn PolicySource>, SourceError> {
        Ok(Box::new(BuiltinSource))
    }
}
