//! git::errors
//!
//! Error types for the repository cache.
//!
//! # Example
//!
//! ```
//! use repoowners::git::GitError;
//!
//! let err = GitError::InvalidSpec("github.com/only-org".to_string());
//! assert!(err.to_string().contains("github.com/only-org"));
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors from materializing a remote tree.
#[derive(Debug, Error)]
pub enum GitError {
    /// Remote identifier could not be parsed.
    #[error("invalid remote '{0}', expected host/org/repo[:branch]")]
    InvalidSpec(String),

    /// Cloning the bare mirror failed.
    #[error("failed to clone {url}: {message}")]
    CloneFailed {
        /// Remote URL
        url: String,
        /// Description of the failure
        message: String,
    },

    /// Fetching into an existing mirror failed.
    #[error("failed to fetch {url}: {message}")]
    FetchFailed {
        /// Remote URL
        url: String,
        /// Description of the failure
        message: String,
    },

    /// An existing mirror could not be opened.
    #[error("failed to open cached repository {path}: {message}")]
    OpenFailed {
        /// Mirror path
        path: PathBuf,
        /// Description of the failure
        message: String,
    },

    /// Creating the working checkout failed.
    #[error("failed to check out {spec}: {message}")]
    CheckoutFailed {
        /// Remote identifier
        spec: String,
        /// Description of the failure
        message: String,
    },

    /// Failed to acquire or release the per-remote lock.
    #[error("remote lock error: {0}")]
    Lock(String),

    /// Filesystem error in the cache directory.
    #[error("cache i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}
