//! Image optimization for generated diagrams.
//!
//! Vector images are already web-ready and raster re-encoding is not
//! implemented, so "optimizing" currently means placing a copy of the image
//! at the requested output path.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions handled by [`ImageOptimizer`], lowercase.
pub const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "svg"];

/// Tuning knobs for raster output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizeOptions {
    /// Maximum width in pixels.
    pub max_width: u32,
    /// JPEG quality, 1-100.
    pub quality: u8,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            max_width: 1200,
            quality: 85,
        }
    }
}

/// Prepares generated images for web display.
#[derive(Debug, Clone, Default)]
pub struct ImageOptimizer {
    options: OptimizeOptions,
}

impl ImageOptimizer {
    /// Create an optimizer with the given options.
    pub fn new(options: OptimizeOptions) -> Self {
        Self { options }
    }

    /// Whether a path has a supported image extension.
    pub fn is_supported(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| SUPPORTED_FORMATS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }

    /// Optimize a single image.
    ///
    /// Writes to `output` when given, otherwise in place. Returns `None` if
    /// the input does not exist. Unsupported files and failed copies yield
    /// the input path unchanged.
    pub fn optimize_image(&self, input: &Path, output: Option<&Path>) -> Option<PathBuf> {
        if !input.exists() {
            tracing::warn!("Input image not found: {}", input.display());
            return None;
        }

        if !Self::is_supported(input) {
            tracing::warn!("Unsupported image format: {}", input.display());
            return Some(input.to_path_buf());
        }

        let output = output.unwrap_or(input);
        if !is_vector(input) {
            tracing::debug!(
                "Raster re-encoding unavailable (max_width={}, quality={}), copying {}",
                self.options.max_width,
                self.options.quality,
                input.display()
            );
        }

        if output != input {
            if let Err(e) = fs::copy(input, output) {
                tracing::warn!("Could not optimize image {}: {}", input.display(), e);
                return Some(input.to_path_buf());
            }
        }

        Some(output.to_path_buf())
    }

    /// Optimize every supported image directly inside `dir`.
    ///
    /// Returns the resulting paths in file-name order, or an empty list if
    /// the directory does not exist.
    pub fn optimize_directory(&self, dir: &Path) -> Vec<PathBuf> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Directory not found: {} ({})", dir.display(), e);
                return Vec::new();
            }
        };

        let mut images: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && Self::is_supported(path))
            .collect();
        images.sort();

        images
            .iter()
            .filter_map(|path| self.optimize_image(path, None))
            .collect()
    }
}

fn is_vector(path: &Path) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}
