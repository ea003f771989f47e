//! git::lock
//!
//! Per-remote lock serializing clone/fetch into a cached mirror.
//!
//! # Architecture
//!
//! Two layers, both keyed by the remote id (`host/org/repo`):
//!
//! - an in-process registry, so threads sharing one [`super::RepoCache`] wait
//!   for each other
//! - an OS-level exclusive lock on `<cache>/<host>/<org>/<repo>.lock` via `fs2`,
//!   so separate processes sharing a cache directory do too
//!
//! Locks on different remotes never contend.
//!
//! # Invariants
//!
//! - Lock must be held while the mirror is cloned or fetched
//! - Lock is automatically released on drop (RAII pattern)

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use fs2::FileExt;

use super::errors::GitError;

/// Default timeout for lock acquisition.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(300);

/// Polling interval when waiting for the file lock.
const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// In-process set of held remote ids.
#[derive(Debug, Default)]
pub struct LockRegistry {
    held: Mutex<HashSet<String>>,
    released: Condvar,
}

impl LockRegistry {
    fn claim(&self, key: &str, deadline: Instant) -> Result<(), GitError> {
        let mut held = self
            .held
            .lock()
            .map_err(|_| GitError::Lock("lock registry poisoned".to_string()))?;
        while held.contains(key) {
            let now = Instant::now();
            if now >= deadline {
                return Err(GitError::Lock(format!("timed out waiting for {}", key)));
            }
            let (guard, _) = self
                .released
                .wait_timeout(held, deadline - now)
                .map_err(|_| GitError::Lock("lock registry poisoned".to_string()))?;
            held = guard;
        }
        held.insert(key.to_string());
        Ok(())
    }

    fn release(&self, key: &str) {
        if let Ok(mut held) = self.held.lock() {
            held.remove(key);
        }
        self.released.notify_all();
    }

    /// True if some thread in this process holds the lock for `key`.
    pub fn is_held(&self, key: &str) -> bool {
        self.held
            .lock()
            .map(|held| held.contains(key))
            .unwrap_or(false)
    }
}

/// An exclusive lock on one remote's mirror.
#[derive(Debug)]
pub struct RemoteLock {
    /// Path to the lock file.
    path: PathBuf,
    /// The open file handle with the lock held.
    file: Option<File>,
    /// Remote id this lock is for.
    key: String,
    registry: Arc<LockRegistry>,
}

impl RemoteLock {
    /// Acquire the lock for `key`, blocking up to `timeout`.
    ///
    /// # Errors
    ///
    /// - [`GitError::Lock`] if the timeout expires or the OS lock fails
    /// - [`GitError::Io`] if the lock file cannot be created
    pub fn acquire(
        registry: &Arc<LockRegistry>,
        key: &str,
        path: &Path,
        timeout: Duration,
    ) -> Result<Self, GitError> {
        let deadline = Instant::now() + timeout;
        registry.claim(key, deadline)?;

        match Self::lock_file(path, deadline) {
            Ok(file) => Ok(Self {
                path: path.to_path_buf(),
                file: Some(file),
                key: key.to_string(),
                registry: Arc::clone(registry),
            }),
            Err(e) => {
                registry.release(key);
                Err(e)
            }
        }
    }

    fn lock_file(path: &Path, deadline: Instant) -> Result<File, GitError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| GitError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| GitError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        loop {
            match file.try_lock_exclusive() {
                Ok(()) => return Ok(file),
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    if Instant::now() >= deadline {
                        return Err(GitError::Lock(format!(
                            "timed out waiting for {}",
                            path.display()
                        )));
                    }
                    thread::sleep(LOCK_POLL_INTERVAL);
                }
                Err(e) => return Err(GitError::Lock(format!("lock failed: {}", e))),
            }
        }
    }

    /// Check if the lock is currently held.
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the remote id this lock is for.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Release the lock explicitly.
    pub fn release(&mut self) -> Result<(), GitError> {
        if let Some(file) = self.file.take() {
            let result = FileExt::unlock(&file)
                .map_err(|e| GitError::Lock(format!("unlock failed: {}", e)));
            self.registry.release(&self.key);
            result?;
        }
        Ok(())
    }
}

impl Drop for RemoteLock {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = FileExt::unlock(&file);
            self.registry.release(&self.key);
        }
    }
}
