//! tree::traits
//!
//! Tree provider trait definition.
//!
//! # Contract
//!
//! - [`TreeProvider::owners_files`] returns one `(directory key, bytes)` pair for
//!   every directory holding a declaration file. Order is unspecified.
//! - [`TreeProvider::aliases_file`] returns the root alias file, or `None` when
//!   the tree has none. Absence is not an error.
//! - Any other failure to read is an error and aborts loading.

use std::path::PathBuf;

use thiserror::Error;

/// Conventional declaration file name.
pub const DEFAULT_OWNERS_FILENAME: &str = "OWNERS";

/// Conventional alias file name, read at the tree root only.
pub const DEFAULT_ALIASES_FILENAME: &str = "OWNERS_ALIASES";

/// Errors from enumerating or reading tree files.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The tree root does not exist or is not a directory.
    #[error("tree root is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Reading a file or directory failed.
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// File names a provider looks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filenames {
    /// Per-directory declaration file.
    pub owners: String,
    /// Root alias file.
    pub aliases: String,
}

impl Default for Filenames {
    fn default() -> Self {
        Self {
            owners: DEFAULT_OWNERS_FILENAME.to_string(),
            aliases: DEFAULT_ALIASES_FILENAME.to_string(),
        }
    }
}

/// Source of declaration and alias documents for one tree.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait TreeProvider: Send + Sync {
    /// Every declaration file, keyed by its directory relative to the root.
    fn owners_files(&self) -> Result<Vec<(String, Vec<u8>)>, TreeError>;

    /// The root alias file, if present.
    fn aliases_file(&self) -> Result<Option<Vec<u8>>, TreeError>;

    /// Human-readable description for logs and errors.
    fn describe(&self) -> String {
        "tree".to_string()
    }
}
