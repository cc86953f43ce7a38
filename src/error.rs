//! Error types for archdoc operations.
//!
//! This module defines [`ArchdocError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `ArchdocError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `ArchdocError::Other`) for unexpected errors
//! - The diagram cache never surfaces index corruption or persistence
//!   failures as errors; those are logged and the build continues

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for archdoc operations.
#[derive(Debug, Error)]
pub enum ArchdocError {
    /// Settings file not found at expected location.
    #[error("Settings not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse settings file.
    #[error("Failed to parse settings at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid settings structure or values.
    #[error("Invalid settings: {message}")]
    ConfigValidationError { message: String },

    /// The cache index could not be read or written.
    #[error("Cache index {path}: {message}")]
    CacheIndex { path: PathBuf, message: String },

    /// Rendering a diagram failed.
    #[error("Diagram '{diagram}' failed to render: {message}")]
    RenderFailed { diagram: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for archdoc operations.
pub type Result<T> = std::result::Result<T, ArchdocError>;
