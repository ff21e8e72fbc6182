//! Application configuration loaded from the environment

use std::path::PathBuf;

use bevy::prelude::*;
use flipbook_config::{BookConfig, ConfigError, DisplayConfig};

/// Environment variable naming the book config JSON file
pub const CONFIG_ENV: &str = "FLIPBOOK_CONFIG";

/// Where the book configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No config file was named
    Defaults,
    File(PathBuf),
    /// The named file could not be used; defaults were loaded instead
    Fallback { path: PathBuf, error: String },
}

/// Application configuration resource
#[derive(Resource, Debug, Clone)]
pub struct FlipbookConfig {
    pub display: DisplayConfig,
    pub book: BookConfig,
    pub source: ConfigSource,
}

impl FlipbookConfig {
    /// Load the book config named by `FLIPBOOK_CONFIG`, if any.
    pub fn from_env() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self::from_path(path)
    }

    pub fn from_path(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            return Self::with_book(BookConfig::default(), ConfigSource::Defaults);
        };

        match BookConfig::load(&path) {
            Ok(book) => Self::with_book(book, ConfigSource::File(path)),
            Err(err) => Self::fallback(path, err),
        }
    }

    fn fallback(path: PathBuf, err: ConfigError) -> Self {
        Self::with_book(
            BookConfig::default(),
            ConfigSource::Fallback {
                path,
                error: err.to_string(),
            },
        )
    }

    fn with_book(book: BookConfig, source: ConfigSource) -> Self {
        Self {
            display: DisplayConfig::default(),
            book,
            source,
        }
    }
}

/// Log where the configuration came from once logging is up
pub fn report_config(config: Res<FlipbookConfig>) {
    match &config.source {
        ConfigSource::Defaults => info!(
            "No {} set, using the default book ({} pages)",
            CONFIG_ENV,
            config.book.page_count()
        ),
        ConfigSource::File(path) => info!(
            "Loaded book config from {} ({} pages)",
            path.display(),
            config.book.page_count()
        ),
        ConfigSource::Fallback { path, error } => warn!(
            "Failed to load book config from {}: {}; using the default book",
            path.display(),
            error
        ),
    }
}
