//! Settings file discovery and loading.

use crate::config::schema::Settings;
use crate::error::{ArchdocError, Result};
use std::fs;
use std::path::Path;

/// Settings file looked up in the project root.
pub const SETTINGS_FILE_NAME: &str = "archdoc.yml";

impl Settings {
    /// Load `archdoc.yml` from the project root, or defaults if absent.
    pub fn discover(project_root: &Path) -> Result<Self> {
        let path = project_root.join(SETTINGS_FILE_NAME);
        if path.exists() {
            load_settings_file(&path)
        } else {
            tracing::debug!(
                "No {} in {}, using defaults",
                SETTINGS_FILE_NAME,
                project_root.display()
            );
            Ok(Self::default())
        }
    }
}

/// Load and validate a single settings file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
/// Returns `ConfigValidationError` if a value is out of range.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ArchdocError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ArchdocError::Io(e)
        }
    })?;

    let settings = parse_settings(&content, path)?;
    settings.validate()?;
    Ok(settings)
}

/// Parse YAML content into Settings.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_settings(content: &str, source_path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    serde_yaml::from_str(content).map_err(|e| ArchdocError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
