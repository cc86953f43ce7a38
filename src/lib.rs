//! archdoc - C4 architecture documentation with cached diagram generation.
//!
//! archdoc builds static architecture documentation from diagram sources.
//! Regenerating diagrams is the expensive part of a build, so every
//! rendered diagram is recorded in a content-addressed cache and reused
//! until its source changes.
//!
//! # Modules
//!
//! - [`cache`] - Content hashing, cache entries and the persistent diagram cache
//! - [`ci`] - CI cache configuration
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings loading and validation
//! - [`error`] - Error types and result aliases
//! - [`generator`] - Cache-backed diagram generation
//! - [`optimize`] - Image optimization for rendered diagrams
//!
//! # Example
//!
//! ```
//! use archdoc::cache::{DiagramCache, Metadata, OutputFiles};
//!
//! let dir = std::env::temp_dir().join("archdoc-doc-example");
//! let mut cache = DiagramCache::open(&dir).unwrap();
//!
//! let outputs = OutputFiles::from([("json".to_string(), "context.json".to_string())]);
//! cache.cache_diagram("context.py", Some("{\"views\": []}"), outputs, Metadata::new());
//!
//! assert!(cache.is_cached("context.py", Some("{\"views\": []}")));
//! assert!(!cache.is_cached("context.py", Some("{\"views\": [1]}")));
//! # cache.clear();
//! ```

pub mod cache;
pub mod ci;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod optimize;

pub use error::{ArchdocError, Result};
