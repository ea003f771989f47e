//! repoowners - ownership resolution for source trees
//!
//! Every directory of a tree may carry a declaration file (`OWNERS`) listing
//! approvers, reviewers and required reviewers, and the root may carry an alias
//! file (`OWNERS_ALIASES`) naming groups. This crate answers, for any path, who
//! holds each role there.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, formats answers)
//! - [`core`] - Domain types, the ownership index, the resolution engine and
//!   its cache
//! - [`tree`] - Providers that enumerate declaration files of a tree
//! - [`git`] - Repository cache that materializes remote trees locally
//! - [`ui`] - User-facing output
//!
//! # Resolution Rules
//!
//! 1. Declarations accumulate upward: a directory's set is the union of its own
//!    and every ancestor's, up to the root
//! 2. A directory with `no_inherit: true` stops the walk after itself
//! 3. Alias names are replaced by their members, one level deep
//! 4. Queries never fail; an unowned path resolves to an empty set
//!
//! # Example
//!
//! ```
//! use repoowners::core::owners::Owners;
//! use repoowners::tree::MemoryTree;
//!
//! let tree = MemoryTree::new()
//!     .with_owners("", "approvers: [alice]")
//!     .with_owners("pkg", "reviewers: [bob]");
//! let owners = Owners::load(&tree)?;
//!
//! assert!(owners.is_approver("alice", "pkg/api"));
//! assert!(owners.is_reviewer("bob", "pkg/api"));
//! # Ok::<(), repoowners::core::owners::LoadError>(())
//! ```

pub mod cli;
pub mod core;
pub mod git;
pub mod tree;
pub mod ui;
