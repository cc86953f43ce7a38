//! Diagram caching system.
//!
//! This module provides a disk-backed cache that decides whether a
//! previously generated diagram can be reused. Staleness is tracked by
//! source modification time and SHA-256 content digest, and the whole
//! index is persisted as a single JSON document.

pub mod entry;
pub mod hash;
pub mod store;

pub use entry::{CacheEntry, Metadata, OutputFiles};
pub use hash::{hash_content, hash_file, DIGEST_HEX_LEN};
pub use store::{CacheStats, DiagramCache};

/// Default cache directory, relative to the project root.
pub const DEFAULT_CACHE_DIR: &str = ".cache";

/// Name of the index file inside the cache directory.
pub const CACHE_FILE_NAME: &str = "diagram_cache.json";
