//! Cache-backed diagram generation.
//!
//! [`DiagramGenerator`] asks the cache before rendering each diagram and
//! records fresh outputs afterwards. With caching disabled every query
//! reports a miss and every write is dropped, so callers never need to
//! branch on whether a cache exists.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::job::{DiagramJob, DiagramRenderer, Generation};
use crate::cache::{CacheStats, DiagramCache, Metadata, OutputFiles};
use crate::config::Settings;
use crate::error::{ArchdocError, Result};
use crate::optimize::ImageOptimizer;

/// Cache statistics as reported by a generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorStats {
    /// Whether a cache is attached.
    pub cache_enabled: bool,
    /// Cache statistics, absent when caching is disabled.
    #[serde(flatten)]
    pub cache: Option<CacheStats>,
}

/// Outcome of generating a batch of diagrams.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Keys served from the cache.
    pub cached: Vec<String>,
    /// Keys that were rendered.
    pub generated: Vec<String>,
    /// Keys that failed, with the error message.
    pub failed: Vec<(String, String)>,
    /// Output files of every successful diagram.
    pub outputs: BTreeMap<String, OutputFiles>,
    /// Stale entries pruned after the run.
    pub stale_removed: usize,
    /// Cache statistics after the run.
    pub stats: Option<GeneratorStats>,
}

impl RunReport {
    /// True when no diagram failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of diagrams processed.
    pub fn total(&self) -> usize {
        self.cached.len() + self.generated.len() + self.failed.len()
    }
}

/// Generates diagrams, reusing cached outputs when they are still fresh.
#[derive(Debug)]
pub struct DiagramGenerator {
    cache: Option<DiagramCache>,
    optimizer: ImageOptimizer,
}

impl DiagramGenerator {
    /// Create a generator from settings.
    ///
    /// If the cache directory cannot be created the generator runs without
    /// a cache.
    pub fn new(settings: &Settings, project_root: &Path) -> Self {
        let cache = if settings.cache.enabled {
            let dir = settings.cache.resolved_dir(project_root);
            match DiagramCache::open(&dir) {
                Ok(cache) => Some(cache),
                Err(e) => {
                    tracing::warn!(
                        "Could not open diagram cache at {}: {}; caching disabled",
                        dir.display(),
                        e
                    );
                    None
                }
            }
        } else {
            None
        };

        Self {
            cache,
            optimizer: ImageOptimizer::new(settings.images),
        }
    }

    /// Create a generator around an existing cache.
    pub fn with_cache(cache: DiagramCache) -> Self {
        Self {
            cache: Some(cache),
            optimizer: ImageOptimizer::default(),
        }
    }

    /// Create a generator that always renders.
    pub fn without_cache() -> Self {
        Self {
            cache: None,
            optimizer: ImageOptimizer::default(),
        }
    }

    /// Whether a cache is attached.
    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Check if a diagram is cached and up to date.
    pub fn is_diagram_cached(&self, key: &str, content: Option<&str>) -> bool {
        self.cache
            .as_ref()
            .is_some_and(|cache| cache.is_cached(key, content))
    }

    /// Cached output files for a diagram.
    pub fn cached_outputs(&self, key: &str) -> Option<OutputFiles> {
        self.cache.as_ref()?.cached_outputs(key).cloned()
    }

    /// Record a diagram's outputs. Dropped when caching is disabled.
    pub fn cache_diagram_outputs(
        &mut self,
        key: &str,
        output_files: OutputFiles,
        content: Option<&str>,
        metadata: Metadata,
    ) {
        if let Some(cache) = self.cache.as_mut() {
            cache.cache_diagram(key, content, output_files, metadata);
        }
    }

    /// Clear all cached diagram data.
    pub fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }

    /// Cache statistics.
    pub fn cache_stats(&self) -> GeneratorStats {
        GeneratorStats {
            cache_enabled: self.cache.is_some(),
            cache: self.cache.as_ref().map(DiagramCache::stats),
        }
    }

    /// Optimize all images in an output directory.
    pub fn optimize_output_images(&self, output_dir: &Path) -> Vec<PathBuf> {
        self.optimizer.optimize_directory(output_dir)
    }

    /// Produce a diagram's outputs, rendering only on a cache miss.
    ///
    /// A hit requires both a fresh entry and outputs that still exist. After
    /// rendering, the new outputs are recorded. Render errors are returned
    /// and nothing is cached.
    pub fn generate<R>(&mut self, job: &DiagramJob, renderer: &mut R) -> Result<Generation>
    where
        R: DiagramRenderer + ?Sized,
    {
        let content = job.content.as_deref();

        if self.is_diagram_cached(&job.key, content) {
            if let Some(outputs) = self.cached_outputs(&job.key) {
                tracing::debug!("Using cached outputs for {}", job.key);
                return Ok(Generation::Cached(outputs));
            }
        }

        tracing::debug!("Rendering {}", job.key);
        let outputs = renderer
            .render(job)
            .map_err(|e| ArchdocError::RenderFailed {
                diagram: job.key.clone(),
                message: format!("{:#}", e),
            })?;

        self.cache_diagram_outputs(&job.key, outputs.clone(), content, job.metadata.clone());
        Ok(Generation::Generated(outputs))
    }

    /// Generate a batch of independent diagrams.
    ///
    /// A failing diagram does not stop the others. With `cleanup` set,
    /// entries whose sources have been deleted are pruned afterwards.
    pub fn run<R>(&mut self, jobs: &[DiagramJob], renderer: &mut R, cleanup: bool) -> RunReport
    where
        R: DiagramRenderer + ?Sized,
    {
        let mut report = RunReport::default();

        for job in jobs {
            match self.generate(job, renderer) {
                Ok(generation) => {
                    if generation.is_cached() {
                        report.cached.push(job.key.clone());
                    } else {
                        report.generated.push(job.key.clone());
                    }
                    report.outputs.insert(job.key.clone(), generation.outputs().clone());
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    report.failed.push((job.key.clone(), e.to_string()));
                }
            }
        }

        if cleanup {
            if let Some(cache) = self.cache.as_mut() {
                report.stale_removed = cache.cleanup_stale_entries();
            }
        }
        report.stats = Some(self.cache_stats());

        tracing::info!(
            "Diagrams: {} cached, {} generated, {} failed",
            report.cached.len(),
            report.generated.len(),
            report.failed.len()
        );

        report
    }
}
