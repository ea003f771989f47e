//! core::config::schema
//!
//! Configuration file schema.
//!
//! # Validation
//!
//! Values are validated after parsing: file names must be plain names (no
//! separators) and the declaration and alias names must differ, otherwise the
//! alias file would be picked up as a declaration file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::tree::{DEFAULT_ALIASES_FILENAME, DEFAULT_OWNERS_FILENAME};

/// Tool configuration as written on disk.
///
/// # Example
///
/// ```toml
/// owners_filename = "OWNERS"
/// aliases_filename = "OWNERS_ALIASES"
/// cache_dir = "/var/cache/repoowners"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Per-directory declaration file name
    pub owners_filename: Option<String>,

    /// Root alias file name
    pub aliases_filename: Option<String>,

    /// Where remote mirrors are cached
    pub cache_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = &self.owners_filename {
            validate_filename("owners_filename", name)?;
        }
        if let Some(name) = &self.aliases_filename {
            validate_filename("aliases_filename", name)?;
        }
        let owners = self.owners_filename.as_deref().unwrap_or(DEFAULT_OWNERS_FILENAME);
        let aliases = self.aliases_filename.as_deref().unwrap_or(DEFAULT_ALIASES_FILENAME);
        if owners == aliases {
            return Err(ConfigError::InvalidValue(format!(
                "owners_filename and aliases_filename are both '{}'",
                owners
            )));
        }
        if let Some(dir) = &self.cache_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "cache_dir cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Overlay `other` on top of `self`; values set in `other` win.
    pub fn merged(self, other: FileConfig) -> FileConfig {
        FileConfig {
            owners_filename: other.owners_filename.or(self.owners_filename),
            aliases_filename: other.aliases_filename.or(self.aliases_filename),
            cache_dir: other.cache_dir.or(self.cache_dir),
        }
    }
}

fn validate_filename(key: &str, name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::InvalidValue(format!("{} cannot be empty", key)));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(ConfigError::InvalidValue(format!(
            "{} must be a plain file name, got '{}'",
            key, name
        )));
    }
    Ok(())
}
