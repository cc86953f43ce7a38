//! Cache entry type and timestamp helpers.

use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Rendered artifacts keyed by output format (e.g. "json", "plantuml", "png").
pub type OutputFiles = BTreeMap<String, String>;

/// Free-form data remembered alongside an entry (diagram type, title, ...).
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A cached diagram.
///
/// `file_path` is the path exactly as the caller supplied it. The index key
/// is the canonical form of that path and is stored separately by
/// [`DiagramCache`](super::DiagramCache).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Source path as given at cache-write time.
    pub file_path: String,
    /// Hex SHA-256 of the source bytes or of the supplied content.
    pub content_hash: String,
    /// Source modification time when cached, or the write time if the
    /// source did not exist.
    pub last_modified: NaiveDateTime,
    /// Output format to rendered file path.
    pub output_files: OutputFiles,
    /// Caller-supplied metadata. Opaque to the cache.
    pub metadata: Metadata,
}

impl CacheEntry {
    /// Create a new entry with no outputs or metadata.
    pub fn new(
        file_path: impl Into<String>,
        content_hash: impl Into<String>,
        last_modified: NaiveDateTime,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            content_hash: content_hash.into(),
            last_modified,
            output_files: OutputFiles::new(),
            metadata: Metadata::new(),
        }
    }

    /// Set the output files.
    pub fn with_outputs(mut self, output_files: OutputFiles) -> Self {
        self.output_files = output_files;
        self
    }

    /// Set the metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Number of recorded output files.
    pub fn output_count(&self) -> usize {
        self.output_files.len()
    }

    /// Whether the recorded source path currently exists.
    pub fn source_exists(&self) -> bool {
        Path::new(&self.file_path).exists()
    }
}

/// Modification time of a file as a local timestamp, if it exists.
pub fn file_modified(path: &Path) -> Option<NaiveDateTime> {
    fs::metadata(path)
        .ok()
        .and_then(|m| m.modified().ok())
        .map(|t| truncate_to_micros(DateTime::<Local>::from(t).naive_local()))
}

/// Current local time at the same precision as [`file_modified`].
pub fn now() -> NaiveDateTime {
    truncate_to_micros(Local::now().naive_local())
}

// Stored timestamps carry microseconds at most, so a reloaded entry compares
// equal to the mtime it was built from.
fn truncate_to_micros(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_nanosecond(ts.nanosecond() / 1_000 * 1_000).unwrap_or(ts)
}
