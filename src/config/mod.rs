//! Settings loading and validation.
//!
//! Settings live in an optional `archdoc.yml` at the project root. Every
//! field has a default, so a project without the file behaves as if it
//! contained an empty document.

pub mod loader;
pub mod schema;

pub use loader::{load_settings_file, parse_settings, SETTINGS_FILE_NAME};
pub use schema::{CacheSettings, Settings};
