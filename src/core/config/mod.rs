//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (applied with [`Config::with_overrides`])
//!
//! # Config Locations
//!
//! An explicit path (`--config`) must exist. Otherwise the first existing file
//! of:
//! 1. `$REPOOWNERS_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/repoowners/config.toml`
//! 3. `~/.repoowners/config.toml`
//!
//! No file at all is not an error; defaults are used.
//!
//! # Example
//!
//! ```no_run
//! use repoowners::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("declarations: {}", config.filenames().owners);
//! println!("cache: {}", config.cache_dir().display());
//! ```

pub mod schema;

pub use schema::FileConfig;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::tree::{Filenames, DEFAULT_ALIASES_FILENAME, DEFAULT_OWNERS_FILENAME};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "REPOOWNERS_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Effective configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    file: FileConfig,
    /// Path to the config file (if loaded)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// If `explicit` is given that file is read and must exist; otherwise the
    /// standard locations are searched.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed, or
    /// validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::search_paths(|key| std::env::var(key).ok(), dirs::home_dir())
                .into_iter()
                .find(|candidate| candidate.is_file()),
        };

        let Some(path) = path else {
            tracing::debug!("no config file found, using defaults");
            return Ok(Self::default());
        };

        let file = Self::read(&path)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(Self {
            file,
            path: Some(path),
        })
    }

    /// Candidate config files in search order.
    fn search_paths(env: impl Fn(&str) -> Option<String>, home: Option<PathBuf>) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(path) = env(CONFIG_ENV).filter(|p| !p.is_empty()) {
            candidates.push(PathBuf::from(path));
        }
        if let Some(xdg) = env("XDG_CONFIG_HOME").filter(|p| !p.is_empty()) {
            candidates.push(PathBuf::from(xdg).join("repoowners/config.toml"));
        }
        if let Some(home) = home {
            candidates.push(home.join(".repoowners/config.toml"));
        }
        candidates
    }

    /// Read, parse and validate one config file.
    pub fn read(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: FileConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;
        Ok(file)
    }

    /// Apply higher-precedence values (CLI flags) and re-validate.
    pub fn with_overrides(self, overrides: FileConfig) -> Result<Self, ConfigError> {
        let file = self.file.merged(overrides);
        file.validate()?;
        Ok(Self {
            file,
            path: self.path,
        })
    }

    /// Declaration and alias file names.
    pub fn filenames(&self) -> Filenames {
        Filenames {
            owners: self
                .file
                .owners_filename
                .clone()
                .unwrap_or_else(|| DEFAULT_OWNERS_FILENAME.to_string()),
            aliases: self
                .file
                .aliases_filename
                .clone()
                .unwrap_or_else(|| DEFAULT_ALIASES_FILENAME.to_string()),
        }
    }

    /// Directory for cached remote mirrors.
    ///
    /// Defaults to the platform cache directory, or the system temp directory
    /// when there is none.
    pub fn cache_dir(&self) -> PathBuf {
        self.file
            .cache_dir
            .clone()
            .unwrap_or_else(Self::default_cache_dir)
    }

    /// The default mirror cache directory.
    pub fn default_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("repoowners")
    }

    /// Get the path to the loaded config file.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_file() {
        let config = Config::default();
        assert_eq!(config.filenames(), Filenames::default());
        assert!(config.cache_dir().ends_with("repoowners"));
        assert!(config.loaded_from().is_none());
    }

    #[test]
    fn load_explicit_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
            owners_filename = "OWNERS.yaml"
            cache_dir = "/srv/mirrors"
            "#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.filenames().owners, "OWNERS.yaml");
        assert_eq!(config.filenames().aliases, DEFAULT_ALIASES_FILENAME);
        assert_eq!(config.cache_dir(), PathBuf::from("/srv/mirrors"));
        assert_eq!(config.loaded_from(), Some(path.as_path()));
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let result = Config::load(Some(&temp.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "owners_filename = \"OWNERS\"\nunknown_field = true\n").unwrap();

        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn invalid_values_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "owners_filename = \"a/OWNERS\"\n").unwrap();

        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn search_order() {
        let env = |key: &str| match key {
            CONFIG_ENV => Some("/etc/owners.toml".to_string()),
            "XDG_CONFIG_HOME" => Some("/home/u/.config".to_string()),
            _ => None,
        };
        let paths = Config::search_paths(env, Some(PathBuf::from("/home/u")));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/etc/owners.toml"),
                PathBuf::from("/home/u/.config/repoowners/config.toml"),
                PathBuf::from("/home/u/.repoowners/config.toml"),
            ]
        );
    }

    #[test]
    fn search_skips_unset_and_empty() {
        let env = |key: &str| match key {
            "XDG_CONFIG_HOME" => Some(String::new()),
            _ => None,
        };
        assert!(Config::search_paths(env, None).is_empty());
    }

    #[test]
    fn overrides_win_and_are_validated() {
        let config = Config::default()
            .with_overrides(FileConfig {
                aliases_filename: Some("TEAMS".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(config.filenames().aliases, "TEAMS");
        assert_eq!(config.filenames().owners, DEFAULT_OWNERS_FILENAME);

        let clash = config.with_overrides(FileConfig {
            owners_filename: Some("TEAMS".to_string()),
            ..Default::default()
        });
        assert!(clash.is_err());
    }
}
