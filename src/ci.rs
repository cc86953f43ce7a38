//! CI cache configuration.
//!
//! Describes which paths a CI workflow should persist between runs so the
//! diagram cache, rendered images and the PlantUML jar survive.

use serde::{Deserialize, Serialize};

/// Cache settings for a GitHub Actions workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiCacheConfig {
    /// Paths to persist.
    pub cache_paths: Vec<String>,
    /// Prefix for the primary cache key.
    pub cache_key_prefix: String,
    /// Fallback key prefixes, most specific first.
    pub restore_keys: Vec<String>,
}

/// Cache configuration for the GitHub Actions site build.
pub fn github_actions_cache_config() -> CiCacheConfig {
    CiCacheConfig {
        cache_paths: vec![
            "~/.cache/uv".to_string(),
            ".cache/".to_string(),
            "docs/images/".to_string(),
            "plantuml.jar".to_string(),
        ],
        cache_key_prefix: "pystructurizr-diagrams".to_string(),
        restore_keys: vec![
            "pystructurizr-diagrams-".to_string(),
            "pystructurizr-".to_string(),
        ],
    }
}
