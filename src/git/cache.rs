//! git::cache
//!
//! Local cache of remote repositories.
//!
//! # Layout
//!
//! - `<cache>/<host>/<org>/<repo>.git` - bare mirror, refs/heads mapped 1:1
//! - `<cache>/<host>/<org>/<repo>.lock` - per-remote lock file
//!
//! # Flow
//!
//! [`RepoCache::checkout`] takes the per-remote lock, clones the mirror if it
//! is missing or fetches into it otherwise, then clones a private working copy
//! from the mirror into a fresh temporary directory. The lock is held until the
//! working copy exists, so a checkout never sees a mirror mid-fetch. The working
//! copy is never touched by later fetches.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use super::errors::GitError;
use super::lock::{LockRegistry, RemoteLock, DEFAULT_LOCK_TIMEOUT};
use super::remote::RemoteSpec;

/// Fetch refspec for mirrors: every branch lands under the same name.
const MIRROR_REFSPEC: &str = "+refs/heads/*:refs/heads/*";

const REMOTE_NAME: &str = "origin";

/// A directory of bare mirrors plus per-remote locks.
///
/// Safe to share between threads; checkouts of different remotes proceed in
/// parallel, checkouts of the same remote are serialized.
#[derive(Debug)]
pub struct RepoCache {
    dir: PathBuf,
    registry: Arc<LockRegistry>,
    lock_timeout: Duration,
    /// Owns the directory when created by [`RepoCache::temporary`].
    _temp: Option<TempDir>,
}

impl RepoCache {
    /// Use `dir` as the cache directory. It is created on first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            registry: Arc::new(LockRegistry::default()),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            _temp: None,
        }
    }

    /// Create a cache in a fresh temporary directory, removed on drop.
    pub fn temporary() -> Result<Self, GitError> {
        let temp = tempfile::Builder::new()
            .prefix("git-cache")
            .tempdir()
            .map_err(|e| GitError::Io {
                path: std::env::temp_dir(),
                source: e,
            })?;
        let mut cache = Self::new(temp.path());
        cache._temp = Some(temp);
        Ok(cache)
    }

    /// Override how long a checkout waits for another holder of the same remote.
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// The cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the bare mirror for `spec` lives.
    pub fn mirror_path(&self, spec: &RemoteSpec) -> PathBuf {
        self.dir.join(spec.mirror_relpath())
    }

    fn lock_path(&self, spec: &RemoteSpec) -> PathBuf {
        self.mirror_path(spec).with_extension("lock")
    }

    /// Materialize `spec` as a private working copy.
    ///
    /// # Errors
    ///
    /// - [`GitError::Lock`] if the remote stays locked past the timeout
    /// - [`GitError::CloneFailed`] / [`GitError::FetchFailed`] on network or
    ///   repository failures
    /// - [`GitError::CheckoutFailed`] if the working copy cannot be created
    pub fn checkout(&self, spec: &RemoteSpec) -> Result<Checkout, GitError> {
        let key = spec.id();
        let _lock = RemoteLock::acquire(&self.registry, &key, &self.lock_path(spec), self.lock_timeout)?;
        tracing::debug!(remote = %key, "acquired remote lock");

        let mirror = self.refresh_mirror(spec)?;
        let checkout = Self::clone_working_copy(&mirror, spec)?;
        tracing::debug!(remote = %spec, dir = %checkout.path().display(), "checked out working copy");
        Ok(checkout)
    }

    /// Clone the mirror if absent, otherwise fetch into it.
    ///
    /// A mirror that cannot be opened is rebuilt. A mirror that has never
    /// completed a fetch is removed again when its fetch fails, so the next
    /// caller starts clean.
    fn refresh_mirror(&self, spec: &RemoteSpec) -> Result<PathBuf, GitError> {
        let mirror = self.mirror_path(spec);
        let url = spec.url();

        let existing = match fs::metadata(&mirror) {
            Ok(_) => match git2::Repository::open_bare(&mirror) {
                Ok(repo) => Some(repo),
                Err(e) => {
                    tracing::warn!(mirror = %mirror.display(), error = %e.message(), "rebuilding unreadable mirror");
                    discard_mirror(&mirror)?;
                    None
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(GitError::Io {
                    path: mirror,
                    source: e,
                })
            }
        };

        let (repo, fresh) = match existing {
            Some(repo) => {
                tracing::debug!(mirror = %mirror.display(), "fetching into cached mirror");
                repo.remote_set_url(REMOTE_NAME, &url)?;
                let fresh = repo.is_empty()?;
                (repo, fresh)
            }
            None => {
                tracing::debug!(url = %url, mirror = %mirror.display(), "creating mirror");
                (Self::init_mirror(&mirror, &url)?, true)
            }
        };

        match Self::fetch_mirror(&repo, &url) {
            Ok(()) => Ok(mirror),
            Err(GitError::FetchFailed { url, message }) if fresh => {
                drop(repo);
                // Removal failures are logged inside.
                let _ = discard_mirror(&mirror);
                Err(GitError::CloneFailed { url, message })
            }
            Err(e) => Err(e),
        }
    }

    fn init_mirror(mirror: &Path, url: &str) -> Result<git2::Repository, GitError> {
        let clone_failed = |e: git2::Error| GitError::CloneFailed {
            url: url.to_string(),
            message: e.message().to_string(),
        };
        if let Some(parent) = mirror.parent() {
            fs::create_dir_all(parent).map_err(|e| GitError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let repo = git2::Repository::init_bare(mirror).map_err(clone_failed)?;
        let configured = repo
            .remote_with_fetch(REMOTE_NAME, url, MIRROR_REFSPEC)
            .map(drop);
        if let Err(e) = configured {
            drop(repo);
            let _ = discard_mirror(mirror);
            return Err(clone_failed(e));
        }
        Ok(repo)
    }

    fn fetch_mirror(repo: &git2::Repository, url: &str) -> Result<(), GitError> {
        let fetch_failed = |e: git2::Error| GitError::FetchFailed {
            url: url.to_string(),
            message: e.message().to_string(),
        };

        let mut remote = repo.find_remote(REMOTE_NAME).map_err(fetch_failed)?;
        remote
            .connect(git2::Direction::Fetch)
            .map_err(fetch_failed)?;
        let default_branch = remote
            .default_branch()
            .ok()
            .and_then(|buf| buf.as_str().map(str::to_string));
        remote.disconnect().map_err(fetch_failed)?;

        remote
            .fetch(&[MIRROR_REFSPEC], None, None)
            .map_err(fetch_failed)?;

        if let Some(branch) = default_branch {
            repo.set_head(&branch).map_err(fetch_failed)?;
        }
        Ok(())
    }

    fn clone_working_copy(mirror: &Path, spec: &RemoteSpec) -> Result<Checkout, GitError> {
        let checkout_failed = |message: String| GitError::CheckoutFailed {
            spec: spec.to_string(),
            message,
        };

        let dir = tempfile::Builder::new()
            .prefix("repoowners-")
            .tempdir()
            .map_err(|e| checkout_failed(e.to_string()))?;
        let source = mirror
            .to_str()
            .ok_or_else(|| checkout_failed(format!("non UTF-8 path {}", mirror.display())))?;

        let mut builder = git2::build::RepoBuilder::new();
        if let Some(branch) = spec.branch() {
            builder.branch(branch);
        }
        builder
            .clone(source, dir.path())
            .map_err(|e| checkout_failed(e.message().to_string()))?;

        Ok(Checkout {
            dir,
            spec: spec.clone(),
        })
    }

    /// Remove every cached mirror.
    pub fn clean(&self) -> Result<(), GitError> {
        match fs::remove_dir_all(&self.dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GitError::Io {
                path: self.dir.clone(),
                source: e,
            }),
        }
    }
}

/// Remove a mirror directory. Failures are logged and returned.
fn discard_mirror(mirror: &Path) -> Result<(), GitError> {
    match fs::remove_dir_all(mirror) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            tracing::warn!(mirror = %mirror.display(), error = %e, "failed to remove mirror");
            Err(GitError::Io {
                path: mirror.to_path_buf(),
                source: e,
            })
        }
    }
}

/// A private working copy of a remote, removed on drop.
#[derive(Debug)]
pub struct Checkout {
    dir: TempDir,
    spec: RemoteSpec,
}

impl Checkout {
    /// Root of the working copy.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The remote this copy was made from.
    pub fn spec(&self) -> &RemoteSpec {
        &self.spec
    }

    /// Commit summaries reachable from HEAD, newest first.
    pub fn log(&self) -> Result<Vec<String>, GitError> {
        let repo = git2::Repository::open(self.path())?;
        let mut walk = repo.revwalk()?;
        walk.push_head()?;

        let mut summaries = Vec::new();
        for oid in walk {
            let commit = repo.find_commit(oid?)?;
            summaries.push(commit.summary().unwrap_or_default().to_string());
        }
        Ok(summaries)
    }

    /// Keep the directory on disk and return its path.
    pub fn keep(self) -> PathBuf {
        self.dir.keep()
    }
}
