//! core::owners
//!
//! The loaded ownership facade: index, resolution engine and cache together.
//!
//! # Lifecycle
//!
//! An [`Owners`] is built once per tree by one of the `load` constructors and is
//! read-only afterwards. Queries take `&self` and are safe to run from any
//! number of threads at once; the only shared mutable state is the
//! [`ResolutionCache`]. Reloading means building a new `Owners`.
//!
//! # Example
//!
//! ```
//! use repoowners::core::owners::Owners;
//! use repoowners::tree::MemoryTree;
//!
//! let tree = MemoryTree::new()
//!     .with_owners("", "approvers: [alice, admins]")
//!     .with_owners("bar", "no_inherit: true\napprovers: [bob]")
//!     .with_aliases("aliases:\n  admins: [dave]");
//!
//! let owners = Owners::load(&tree)?;
//! assert_eq!(owners.approvers("").list(), vec!["alice", "dave"]);
//! assert_eq!(owners.approvers("bar/baz").list(), vec!["bob"]);
//! assert!(owners.is_approver("dave", "docs"));
//! assert!(!owners.is_approver("alice", "bar"));
//! # Ok::<(), repoowners::core::owners::LoadError>(())
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use super::cache::ResolutionCache;
use super::index::OwnershipIndex;
use super::paths;
use super::resolve::{expand_aliases, walk};
use super::schema::{parse_aliases_bytes, parse_owners_bytes, SchemaError};
use super::types::{Role, UsernameSet};
use crate::git::{Checkout, GitError, RemoteSpec, RepoCache};
use crate::tree::{Filenames, FsTree, TreeError, TreeProvider};

/// Errors from loading a tree. No partial index is ever returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("invalid declaration file in '{dir}': {source}")]
    Owners {
        /// Directory key of the offending file (`.` for the root).
        dir: String,
        #[source]
        source: SchemaError,
    },

    #[error("invalid alias file: {source}")]
    Aliases {
        #[source]
        source: SchemaError,
    },

    #[error(transparent)]
    Git(#[from] GitError),
}

/// Ownership declarations of one tree, ready to answer queries.
#[derive(Debug)]
pub struct Owners {
    index: OwnershipIndex,
    cache: ResolutionCache,
    base: Option<PathBuf>,
    /// Keeps a remote working copy on disk for as long as this value lives.
    checkout: Option<Checkout>,
}

impl Owners {
    /// Wrap an already built index with an empty cache.
    pub fn from_index(index: OwnershipIndex) -> Self {
        Self {
            index,
            cache: ResolutionCache::new(),
            base: None,
            checkout: None,
        }
    }

    /// Load every declaration and the alias file from a tree provider.
    ///
    /// # Errors
    ///
    /// - [`LoadError::Tree`] if a file cannot be read
    /// - [`LoadError::Owners`] / [`LoadError::Aliases`] if a document is malformed
    pub fn load(tree: &dyn TreeProvider) -> Result<Self, LoadError> {
        let aliases = match tree.aliases_file()? {
            Some(bytes) => {
                Some(parse_aliases_bytes(&bytes).map_err(|source| LoadError::Aliases { source })?)
            }
            None => None,
        };

        let files = tree.owners_files()?;
        let mut declarations = Vec::with_capacity(files.len());
        for (dir, bytes) in files {
            let config = parse_owners_bytes(&bytes).map_err(|source| LoadError::Owners {
                dir: if dir.is_empty() { ".".to_string() } else { dir.clone() },
                source,
            })?;
            declarations.push((dir, config));
        }

        let index = OwnershipIndex::build(declarations, aliases);
        tracing::debug!(
            source = %tree.describe(),
            directories = index.directory_count(),
            aliases = index.aliases().len(),
            "loaded ownership index"
        );
        Ok(Self::from_index(index))
    }

    /// Load a tree from a directory on local disk.
    pub fn load_local(root: impl AsRef<Path>, filenames: &Filenames) -> Result<Self, LoadError> {
        let root = root.as_ref();
        let mut owners = Self::load(&FsTree::new(root, filenames.clone()))?;
        owners.base = Some(root.to_path_buf());
        Ok(owners)
    }

    /// Materialize a remote through the repository cache and load it.
    ///
    /// The working copy stays on disk until the returned value is dropped.
    pub fn load_remote(
        cache: &RepoCache,
        spec: &RemoteSpec,
        filenames: &Filenames,
    ) -> Result<Self, LoadError> {
        let checkout = cache.checkout(spec)?;
        let mut owners = Self::load_local(checkout.path(), filenames)?;
        owners.checkout = Some(checkout);
        Ok(owners)
    }

    /// The resolved set for `role` at directory `path`.
    ///
    /// Unknown paths resolve to an empty set. Results are memoized per role and
    /// normalized directory.
    pub fn resolve(&self, role: Role, path: &str) -> Arc<UsernameSet> {
        let dir = paths::normalize(path);
        self.cache.get_or_compute(role, &dir, || {
            expand_aliases(&self.index, &walk(&self.index, role, &dir))
        })
    }

    pub fn approvers(&self, path: &str) -> Arc<UsernameSet> {
        self.resolve(Role::Approver, path)
    }

    pub fn reviewers(&self, path: &str) -> Arc<UsernameSet> {
        self.resolve(Role::Reviewer, path)
    }

    pub fn required_reviewers(&self, path: &str) -> Arc<UsernameSet> {
        self.resolve(Role::RequiredReviewer, path)
    }

    /// True if `user` holds `role` at `path`.
    pub fn holds(&self, role: Role, user: &str, path: &str) -> bool {
        self.resolve(role, path).has(user)
    }

    pub fn is_approver(&self, user: &str, path: &str) -> bool {
        self.holds(Role::Approver, user, path)
    }

    pub fn is_reviewer(&self, user: &str, path: &str) -> bool {
        self.holds(Role::Reviewer, user, path)
    }

    pub fn is_required_reviewer(&self, user: &str, path: &str) -> bool {
        self.holds(Role::RequiredReviewer, user, path)
    }

    /// The underlying index.
    pub fn index(&self) -> &OwnershipIndex {
        &self.index
    }

    /// The resolution cache, for stats.
    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Directory the tree was loaded from, if it came from disk.
    pub fn base(&self) -> Option<&Path> {
        self.checkout
            .as_ref()
            .map(Checkout::path)
            .or(self.base.as_deref())
    }

    /// The remote working copy backing this tree, if any.
    pub fn checkout(&self) -> Option<&Checkout> {
        self.checkout.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MemoryTree;
    use std::fs;
    use tempfile::TempDir;

    fn sample() -> Owners {
        let tree = MemoryTree::new()
            .with_owners("", "approvers: [alice, admins]\nreviewers: [carol]")
            .with_owners("bar", "no_inherit: true\napprovers: [bob]")
            .with_owners("bar/baz", "approvers: [charlie]\nrequired_reviewers: [erin]")
            .with_aliases("aliases:\n  admins: [dave]");
        Owners::load(&tree).unwrap()
    }

    #[test]
    fn load_and_resolve() {
        let owners = sample();

        assert_eq!(owners.approvers("").list(), vec!["alice", "dave"]);
        assert_eq!(owners.approvers("bar/baz").list(), vec!["bob", "charlie"]);
        assert_eq!(owners.reviewers("docs").list(), vec!["carol"]);
        assert!(owners.reviewers("bar/baz").is_empty());
        assert_eq!(owners.required_reviewers("bar/baz/x").list(), vec!["erin"]);
    }

    #[test]
    fn membership_matches_resolution() {
        let owners = sample();
        for path in ["", "bar", "bar/baz", "docs", "bar/baz/deep/er"] {
            for user in ["alice", "bob", "charlie", "dave", "admins", "carol", "erin"] {
                for role in Role::ALL {
                    assert_eq!(
                        owners.holds(role, user, path),
                        owners.resolve(role, path).has(user),
                        "{} {} {}",
                        role,
                        user,
                        path
                    );
                }
            }
        }
        assert!(owners.is_approver("dave", "docs"));
        assert!(!owners.is_approver("admins", "docs"));
        assert!(owners.is_reviewer("carol", "bar"));
        assert!(owners.is_required_reviewer("erin", "bar/baz"));
        assert!(!owners.is_required_reviewer("erin", "bar"));
    }

    #[test]
    fn repeated_queries_hit_cache() {
        let owners = sample();
        let first = owners.approvers("bar/baz");
        let second = owners.approvers("./bar/baz/");

        assert!(Arc::ptr_eq(&first, &second));
        let stats = owners.cache().stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn malformed_declaration_names_directory() {
        let tree = MemoryTree::new()
            .with_owners("", "approvers: [alice]")
            .with_owners("bad/dir", "approvers: [unterminated");

        match Owners::load(&tree) {
            Err(LoadError::Owners { dir, .. }) => assert_eq!(dir, "bad/dir"),
            other => panic!("expected owners error, got {:?}", other),
        }
    }

    #[test]
    fn malformed_root_declaration_shows_dot() {
        let tree = MemoryTree::new().with_owners("", "approvers: alice");
        let err = Owners::load(&tree).unwrap_err();
        assert!(err.to_string().contains("'.'"));
    }

    #[test]
    fn malformed_aliases_abort_load() {
        let tree = MemoryTree::new()
            .with_owners("", "approvers: [alice]")
            .with_aliases("aliases: [not, a, map]");
        assert!(matches!(Owners::load(&tree), Err(LoadError::Aliases { .. })));
    }

    #[test]
    fn missing_aliases_are_fine() {
        let owners = Owners::load(&MemoryTree::new().with_owners("", "approvers: [admins]")).unwrap();
        assert_eq!(owners.approvers("").list(), vec!["admins"]);
        assert!(owners.index().aliases().is_empty());
    }

    #[test]
    fn load_local_records_base() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("OWNERS"), "approvers: [alice]").unwrap();

        let owners = Owners::load_local(temp.path(), &Filenames::default()).unwrap();
        assert_eq!(owners.base(), Some(temp.path()));
        assert!(owners.checkout().is_none());
        assert!(owners.is_approver("alice", "any/where"));
    }

    #[test]
    fn load_local_missing_root_fails() {
        let temp = TempDir::new().unwrap();
        let result = Owners::load_local(temp.path().join("absent"), &Filenames::default());
        assert!(matches!(result, Err(LoadError::Tree(TreeError::NotADirectory(_)))));
    }

    #[test]
    fn shared_across_threads() {
        let owners = sample();
        let paths = ["", "bar", "bar/baz", "docs/a/b", "bar/baz/c"];

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        for path in paths {
                            let got = owners.approvers(path);
                            let want = expand_aliases(
                                owners.index(),
                                &walk(owners.index(), Role::Approver, &paths::normalize(path)),
                            );
                            assert_eq!(*got, want);
                        }
                    }
                });
            }
        });

        assert_eq!(owners.cache().len(), paths.len());
    }

    #[test]
    fn owners_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Owners>();
    }
}
