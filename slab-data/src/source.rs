use std::path::PathBuf;

use slab_core::{PolicySet, PolicySource, SourceConfig, SourceError, SourceFactory};

use crate::loader::{TableLoader, TableLoaderError};

/// Reads policy tables from a directory holding `brackets.csv` and
/// `modifiers.csv`.
pub struct CsvSource {
    dir: PathBuf,
}

impl CsvSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl PolicySource for CsvSource {
    fn load(&self) -> Result<PolicySet, SourceError> {
        TableLoader::load_dir(&self.dir).map_err(|err| match err {
            TableLoaderError::Io { path, source } if source.kind() == std::io::ErrorKind::NotFound => {
                SourceError::NotFound(path.display().to_string())
            }
            TableLoaderError::Policy(policy) => SourceError::Policy(policy),
            other => SourceError::Read(other.to_string()),
        })
    }
}

/// [`SourceFactory`] for the `"csv"` backend. `location` is the table
/// directory.
pub struct CsvSourceFactory;

impl SourceFactory for CsvSourceFactory {
    fn backend_name(&self) -> &'static str {
        "csv"
    }

    fn create(
        &self,
        config: &SourceConfig,
    ) -> Result<Box<dyn PolicySource>, SourceError> {
        if config.location.trim().is_empty() {
            return Err(SourceError::Configuration(
                "csv backend requires a table directory as location".to_string(),
            ));
        }
        Ok(Box::new(CsvSource::new(config.location.trim())))
    }
}
