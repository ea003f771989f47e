//! git
//!
//! Repository cache for remote ownership trees.
//!
//! # Architecture
//!
//! This module is the only place that talks to `git2`. Callers describe a
//! remote with a [`RemoteSpec`] and ask a [`RepoCache`] for a [`Checkout`]: a
//! private working copy on local disk that the tree walker can read like any
//! other directory.
//!
//! # Invariants
//!
//! - At most one clone/fetch per remote runs at a time, across threads and
//!   across processes sharing the cache directory
//! - A checkout is never modified after it is handed out
//! - Mirrors are bare and carry every branch of the remote under its own name
//!
//! # Example
//!
//! ```no_run
//! use repoowners::git::{RemoteSpec, RepoCache};
//!
//! let cache = RepoCache::new("/var/cache/repoowners");
//! let spec: RemoteSpec = "github.com/kubernetes/test-infra:master".parse()?;
//!
//! let checkout = cache.checkout(&spec)?;
//! println!("{}", checkout.path().display());
//! # Ok::<(), repoowners::git::GitError>(())
//! ```

mod cache;
mod errors;
mod lock;
mod remote;

pub use cache::{Checkout, RepoCache};
pub use errors::GitError;
pub use lock::{LockRegistry, RemoteLock, DEFAULT_LOCK_TIMEOUT};
pub use remote::RemoteSpec;
