//! Error types for configuration loading.

use std::path::PathBuf;

use page_curl::GeometryError;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid page geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
