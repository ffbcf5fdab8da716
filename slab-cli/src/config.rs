//! TOML configuration for `slab-sim`.
//!
//! ```toml
//! log_level = "info"
//! log_file = "slab-sim.log"
//! include_zero_rate_slabs = true
//!
//! [source]
//! backend = "csv"
//! location = "slab-data/data/fy2024-25"
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use slab_core::SourceConfig;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Bare level or full `EnvFilter` directive. Unset defers to `RUST_LOG`.
    pub log_level: Option<String>,
    /// Append log records to this file as well as stderr.
    pub log_file: Option<PathBuf>,
    pub include_zero_rate_slabs: bool,
    pub source: SourceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            log_file: None,
            include_zero_rate_slabs: true,
            source: SourceConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text, path)?;
        debug!(path = %path.display(), backend = %config.source.backend, "config loaded");
        Ok(config)
    }

    /// Reads `path` when given, otherwise returns the defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies command-line overrides.
    ///
    /// `--tables` without `--source` implies the `csv` backend.
    pub fn with_overrides(
        mut self,
        overrides: &Overrides,
    ) -> Self {
        if let Some(level) = &overrides.log_level {
            self.log_level = Some(level.clone());
        }
        if let Some(file) = &overrides.log_file {
            self.log_file = Some(file.clone());
        }
        match (&overrides.source, &overrides.tables) {
            (Some(backend), tables) => {
                self.source.backend = backend.clone();
                if let Some(dir) = tables {
                    self.source.location = dir.display().to_string();
                }
            }
            (None, Some(dir)) => {
                self.source.backend = "csv".to_string();
                self.source.location = dir.display().to_string();
            }
            (None, None) => {}
        }
        self
    }

    /// Filter directive to install: config or flag, then `RUST_LOG`, then `info`.
    pub fn effective_log_level(&self) -> String {
        self.log_level
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok().filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    }
}

/// Flag values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub source: Option<String>,
    pub tables: Option<PathBuf>,
}
