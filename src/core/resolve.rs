//! core::resolve
//!
//! The resolution engine: upward directory walk plus alias expansion.
//!
//! # Algorithm
//!
//! Starting at the queried directory, each level's declared set for the role is
//! unioned into the result. The walk stops after a directory whose options set
//! `no_inherit`, or after the root. Declarations are additive as the walk
//! ascends; a nearer directory never suppresses a farther one.
//!
//! Alias names in the accumulated set are then replaced by their members. The
//! expansion is one level deep: a member that is itself an alias name stays in
//! the result literally.
//!
//! Both steps work on fresh sets; indexed sets are never mutated.

use super::index::OwnershipIndex;
use super::paths;
use super::types::{Role, UsernameSet};

/// Resolve the role set for a directory against an index.
///
/// No caching happens here; see [`crate::core::owners::Owners`].
///
/// # Example
///
/// ```
/// use repoowners::core::index::OwnershipIndex;
/// use repoowners::core::resolve::resolve;
/// use repoowners::core::types::{DirectoryOptions, Role, UsernameSet};
///
/// let mut index = OwnershipIndex::new();
/// index.declare(Role::Approver, "", UsernameSet::from_iter(["alice"]));
/// index.declare(Role::Approver, "bar", UsernameSet::from_iter(["bob"]));
/// index.set_options("bar", DirectoryOptions { no_inheritance: true });
/// index.declare(Role::Approver, "bar/baz", UsernameSet::from_iter(["charlie"]));
///
/// assert_eq!(resolve(&index, Role::Approver, "bar/baz").list(), vec!["bob", "charlie"]);
/// assert_eq!(resolve(&index, Role::Approver, "").list(), vec!["alice"]);
/// ```
pub fn resolve(index: &OwnershipIndex, role: Role, path: &str) -> UsernameSet {
    let dir = paths::normalize(path);
    let collected = walk(index, role, &dir);
    expand_aliases(index, &collected)
}

/// Union the role's declared sets from `dir` upward.
///
/// `dir` must already be normalized.
pub fn walk(index: &OwnershipIndex, role: Role, dir: &str) -> UsernameSet {
    let mut result = UsernameSet::new();
    for current in paths::ancestors(dir) {
        if let Some(declared) = index.declared(role, current) {
            result.extend_from(declared);
        }
        if index.options(current).no_inheritance {
            break;
        }
    }
    result
}

/// Replace alias names in `names` by their members, one level deep.
///
/// Only names present in `names` on entry are checked against the alias table;
/// members contributed by an expansion are never looked up again. The outcome
/// does not depend on iteration order.
pub fn expand_aliases(index: &OwnershipIndex, names: &UsernameSet) -> UsernameSet {
    let mut expanded = names.clone();
    let mut members = UsernameSet::new();
    for name in names.iter() {
        if let Some(alias) = index.alias(name) {
            expanded.delete([name]);
            members.extend_from(alias);
        }
    }
    expanded.extend_from(&members);
    expanded
}
