//! Units of generation work and the renderer seam.

use crate::cache::{Metadata, OutputFiles};

/// One diagram to (re)build.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiagramJob {
    /// Source path identifying the diagram in the cache.
    pub key: String,
    /// Serialized diagram content. When present it decides staleness
    /// instead of the source file.
    pub content: Option<String>,
    /// Metadata stored with the cache entry.
    pub metadata: Metadata,
}

impl DiagramJob {
    /// Create a job for a source path.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Use serialized content for staleness checks.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Add a metadata value.
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Produces rendered artifacts for a diagram.
///
/// Implemented by whatever turns a diagram workspace into files (JSON
/// export, PlantUML, PNG). Closures taking a `&DiagramJob` work too.
pub trait DiagramRenderer {
    /// Render the diagram and return its output files by format.
    fn render(&mut self, job: &DiagramJob) -> anyhow::Result<OutputFiles>;
}

impl<F> DiagramRenderer for F
where
    F: FnMut(&DiagramJob) -> anyhow::Result<OutputFiles>,
{
    fn render(&mut self, job: &DiagramJob) -> anyhow::Result<OutputFiles> {
        self(job)
    }
}

/// How a diagram's outputs were obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum Generation {
    /// Reused from the cache without rendering.
    Cached(OutputFiles),
    /// Freshly rendered and recorded in the cache.
    Generated(OutputFiles),
}

impl Generation {
    /// The output files either way.
    pub fn outputs(&self) -> &OutputFiles {
        match self {
            Generation::Cached(outputs) | Generation::Generated(outputs) => outputs,
        }
    }

    /// Check if the outputs came from the cache.
    pub fn is_cached(&self) -> bool {
        matches!(self, Generation::Cached(_))
    }
}
