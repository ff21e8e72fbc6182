//! Book configuration: page geometry, curl profile and page catalog.

use std::path::Path;

use page_curl::{
    CurlProfile, PageGeometry, PAGE_DEPTH, PAGE_HEIGHT, PAGE_HEIGHT_SEGMENTS, PAGE_SEGMENTS,
    PAGE_WIDTH,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

use crate::error::ConfigError;

/// Page dimensions as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    /// Bend segments across the page width
    pub segments: u32,
    pub height_segments: u32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            depth: PAGE_DEPTH,
            segments: PAGE_SEGMENTS as u32,
            height_segments: PAGE_HEIGHT_SEGMENTS as u32,
        }
    }
}

impl GeometryConfig {
    /// Validate into the geometry used by the rig and sheet.
    pub fn to_geometry(&self) -> Result<PageGeometry, ConfigError> {
        Ok(PageGeometry::new(
            self.width,
            self.height,
            self.depth,
            self.segments,
            self.height_segments,
        )?)
    }
}

/// One page of the catalog: the images printed on each side.
///
/// Names are resource identifiers resolved by the host; the core only
/// counts pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDescriptor {
    pub front: String,
    pub back: String,
}

impl PageDescriptor {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// Ordered list of pages, front cover first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageCatalog {
    pub pages: Vec<PageDescriptor>,
}

impl Default for PageCatalog {
    /// Ten sheets: a cover, eight spreads of pictures and a back cover.
    fn default() -> Self {
        let mut pages = vec![PageDescriptor::new("book-cover", "picture-01")];
        for sheet in 1..9 {
            pages.push(PageDescriptor::new(
                format!("picture-{:02}", sheet * 2),
                format!("picture-{:02}", sheet * 2 + 1),
            ));
        }
        pages.push(PageDescriptor::new("picture-18", "book-back"));
        Self { pages }
    }
}

impl PageCatalog {
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PageDescriptor> {
        self.pages.get(index)
    }
}

/// Complete book configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct BookConfig {
    pub geometry: GeometryConfig,
    pub curl: CurlProfile,
    pub catalog: PageCatalog,
    /// Reading position when the book is first shown
    pub start_page: usize,
}

impl BookConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        debug!(
            "Loaded book config from {}: {} pages",
            path.display(),
            config.page_count()
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry.to_geometry()?;

        if self.catalog.is_empty() {
            return Err(ConfigError::Invalid("page catalog is empty".to_string()));
        }
        if self.start_page > self.catalog.len() {
            return Err(ConfigError::Invalid(format!(
                "start page {} is past the last page ({})",
                self.start_page,
                self.catalog.len()
            )));
        }
        if !(self.curl.smooth_time.is_finite() && self.curl.smooth_time > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "curl smooth time must be positive, got {}",
                self.curl.smooth_time
            )));
        }
        Ok(())
    }

    pub fn page_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn page_geometry(&self) -> Result<PageGeometry, ConfigError> {
        self.geometry.to_geometry()
    }
}
