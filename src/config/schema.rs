//! Settings schema definitions.
//!
//! This module contains the struct definitions that map to the
//! `archdoc.yml` file format.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cache::DEFAULT_CACHE_DIR;
use crate::error::{ArchdocError, Result};
use crate::optimize::OptimizeOptions;

/// Root settings structure for archdoc.yml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Diagram cache settings
    pub cache: CacheSettings,

    /// Image optimization settings
    pub images: OptimizeOptions,
}

/// Diagram cache settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Reuse previously generated diagrams
    pub enabled: bool,

    /// Cache directory (relative to project root)
    pub dir: PathBuf,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: PathBuf::from(DEFAULT_CACHE_DIR),
        }
    }
}

impl CacheSettings {
    /// Cache directory resolved against the project root.
    pub fn resolved_dir(&self, project_root: &Path) -> PathBuf {
        if self.dir.is_absolute() {
            self.dir.clone()
        } else {
            project_root.join(&self.dir)
        }
    }
}

impl Settings {
    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.images.max_width == 0 {
            return Err(ArchdocError::ConfigValidationError {
                message: "images.max_width must be greater than 0".to_string(),
            });
        }

        if !(1..=100).contains(&self.images.quality) {
            return Err(ArchdocError::ConfigValidationError {
                message: format!(
                    "images.quality must be between 1 and 100, got {}",
                    self.images.quality
                ),
            });
        }

        if self.cache.dir.as_os_str().is_empty() {
            return Err(ArchdocError::ConfigValidationError {
                message: "cache.dir must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
