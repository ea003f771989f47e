//! tree
//!
//! Providers that enumerate the declaration files of a source tree.
//!
//! # Architecture
//!
//! Loading an index never touches the filesystem directly. It asks a
//! [`TreeProvider`] for every declaration file and for the alias file, so the
//! same loader runs against:
//!
//! - [`FsTree`]: a directory on local disk (a checkout or a cached clone)
//! - [`MemoryTree`]: in-memory documents, for tests and embedding
//!
//! # Example
//!
//! ```
//! use repoowners::tree::{MemoryTree, TreeProvider};
//!
//! let tree = MemoryTree::new()
//!     .with_owners("", "approvers: [alice]")
//!     .with_owners("docs", "reviewers: [bob]");
//!
//! assert_eq!(tree.owners_files().unwrap().len(), 2);
//! assert!(tree.aliases_file().unwrap().is_none());
//! ```

mod fs_tree;
mod memory;
mod traits;

pub use fs_tree::FsTree;
pub use memory::MemoryTree;
pub use traits::{Filenames, TreeError, TreeProvider, DEFAULT_ALIASES_FILENAME, DEFAULT_OWNERS_FILENAME};
