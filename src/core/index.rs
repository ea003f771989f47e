//! core::index
//!
//! The ownership index built once per source tree.
//!
//! # Tables
//!
//! - one `directory -> UsernameSet` table per [`Role`]
//! - `directory -> DirectoryOptions`
//! - `alias name -> UsernameSet`
//!
//! # Invariants
//!
//! - A directory appears in a role table only if its declaration listed at least
//!   one identity for that role.
//! - Every directory that had a declaration file has an options entry, even when
//!   all of its role lists were empty.
//! - All directory keys are normalized with [`paths::normalize`].
//! - Once handed to [`crate::core::owners::Owners`] the index is never mutated.

use std::collections::HashMap;

use super::paths;
use super::schema::{AliasesConfig, OwnersConfig};
use super::types::{DirectoryOptions, Role, UsernameSet};

/// Ownership declarations for one tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwnershipIndex {
    roles: [HashMap<String, UsernameSet>; 3],
    options: HashMap<String, DirectoryOptions>,
    aliases: HashMap<String, UsernameSet>,
}

impl OwnershipIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from parsed declarations and an optional alias table.
    ///
    /// Declarations may arrive in any order. If the same directory is declared
    /// twice the later declaration replaces the earlier one.
    ///
    /// # Example
    ///
    /// ```
    /// use repoowners::core::index::OwnershipIndex;
    /// use repoowners::core::schema::{parse_aliases, parse_owners};
    /// use repoowners::core::types::Role;
    ///
    /// let root = parse_owners("approvers: [alice, admins]").unwrap();
    /// let aliases = parse_aliases("aliases: {admins: [dave]}").unwrap();
    ///
    /// let index = OwnershipIndex::build([(".", root)], Some(aliases));
    /// assert!(index.declared(Role::Approver, "").unwrap().has("admins"));
    /// assert!(index.alias("admins").unwrap().has("dave"));
    /// ```
    pub fn build<I, K>(declarations: I, aliases: Option<AliasesConfig>) -> Self
    where
        I: IntoIterator<Item = (K, OwnersConfig)>,
        K: AsRef<str>,
    {
        let mut index = Self::new();
        if let Some(aliases) = aliases {
            index.apply_aliases(aliases);
        }
        for (dir, config) in declarations {
            index.apply_owners(dir.as_ref(), config);
        }
        index
    }

    /// Record one directory's declaration.
    pub fn apply_owners(&mut self, dir: &str, config: OwnersConfig) {
        let dir = paths::normalize(dir).into_owned();
        let lists = [
            (Role::Approver, config.approvers),
            (Role::Reviewer, config.reviewers),
            (Role::RequiredReviewer, config.required_reviewers),
        ];
        for (role, names) in lists {
            let table = &mut self.roles[role.index()];
            if names.is_empty() {
                table.remove(&dir);
            } else {
                table.insert(dir.clone(), names.into_iter().collect());
            }
        }
        self.options.insert(dir, config.options);
    }

    /// Record every alias from a parsed alias file.
    pub fn apply_aliases(&mut self, config: AliasesConfig) {
        for (name, members) in config.aliases {
            self.aliases.insert(name, members.into_iter().collect());
        }
    }

    /// Declare a role set for a directory directly.
    ///
    /// An empty set removes the entry, keeping the "explicitly listed" invariant.
    pub fn declare(&mut self, role: Role, dir: &str, names: UsernameSet) {
        let dir = paths::normalize(dir).into_owned();
        let table = &mut self.roles[role.index()];
        if names.is_empty() {
            table.remove(&dir);
        } else {
            table.insert(dir, names);
        }
    }

    /// Set the options for a directory directly.
    pub fn set_options(&mut self, dir: &str, options: DirectoryOptions) {
        self.options
            .insert(paths::normalize(dir).into_owned(), options);
    }

    /// Define an alias directly.
    pub fn set_alias(&mut self, name: impl Into<String>, members: UsernameSet) {
        self.aliases.insert(name.into(), members);
    }

    /// The set a directory declared for a role, if any.
    ///
    /// `dir` must already be normalized.
    pub fn declared(&self, role: Role, dir: &str) -> Option<&UsernameSet> {
        self.roles[role.index()].get(dir)
    }

    /// The options for a directory; absent entries are the default.
    ///
    /// `dir` must already be normalized.
    pub fn options(&self, dir: &str) -> DirectoryOptions {
        self.options.get(dir).copied().unwrap_or_default()
    }

    /// Look up an alias by name.
    pub fn alias(&self, name: &str) -> Option<&UsernameSet> {
        self.aliases.get(name)
    }

    /// All aliases.
    pub fn aliases(&self) -> &HashMap<String, UsernameSet> {
        &self.aliases
    }

    /// Directories with a declaration for `role`.
    pub fn role_table(&self, role: Role) -> &HashMap<String, UsernameSet> {
        &self.roles[role.index()]
    }

    /// Number of directories that had a declaration file.
    pub fn directory_count(&self) -> usize {
        self.options.len()
    }

    /// True if nothing was declared at all.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
            && self.aliases.is_empty()
            && self.roles.iter().all(HashMap::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{parse_aliases, parse_owners};

    fn set(names: &[&str]) -> UsernameSet {
        names.iter().copied().collect()
    }

    #[test]
    fn only_non_empty_roles_are_stored() {
        let config = parse_owners("approvers:\n- alice\n- bob\nreviewers:\n- charlie").unwrap();
        let index = OwnershipIndex::build([("", config)], None);

        assert_eq!(index.declared(Role::Approver, ""), Some(&set(&["alice", "bob"])));
        assert_eq!(index.declared(Role::Reviewer, ""), Some(&set(&["charlie"])));
        assert_eq!(index.declared(Role::RequiredReviewer, ""), None);
        assert!(index.role_table(Role::RequiredReviewer).is_empty());
    }

    #[test]
    fn options_recorded_without_names() {
        let config = parse_owners("no_inherit: true").unwrap();
        let index = OwnershipIndex::build([("foo/bar", config)], None);

        assert!(index.options("foo/bar").no_inheritance);
        assert_eq!(index.directory_count(), 1);
        for role in Role::ALL {
            assert!(index.declared(role, "foo/bar").is_none());
        }
    }

    #[test]
    fn missing_options_default_to_inherit() {
        let index = OwnershipIndex::new();
        assert!(!index.options("anything").no_inheritance);
        assert!(index.is_empty());
    }

    #[test]
    fn keys_are_normalized() {
        let a = parse_owners("approvers: [alice]").unwrap();
        let b = parse_owners("approvers: [bob]").unwrap();
        let index = OwnershipIndex::build([(".", a), ("./foo/bar/", b)], None);

        assert_eq!(index.declared(Role::Approver, ""), Some(&set(&["alice"])));
        assert_eq!(index.declared(Role::Approver, "foo/bar"), Some(&set(&["bob"])));
    }

    #[test]
    fn duplicate_names_collapse() {
        let config = parse_owners("approvers: [alice, alice, bob]").unwrap();
        let index = OwnershipIndex::build([("", config)], None);
        assert_eq!(index.declared(Role::Approver, "").unwrap().len(), 2);
    }

    #[test]
    fn aliases_loaded() {
        let aliases = parse_aliases(
            "aliases:\n  managers:\n    - alice\n  members:\n    - bob\n    - charlie\n    - dave",
        )
        .unwrap();
        let index = OwnershipIndex::build(Vec::<(&str, OwnersConfig)>::new(), Some(aliases));

        assert_eq!(index.aliases().len(), 2);
        assert_eq!(index.alias("managers"), Some(&set(&["alice"])));
        assert_eq!(index.alias("members"), Some(&set(&["bob", "charlie", "dave"])));
        assert_eq!(index.directory_count(), 0);
    }

    #[test]
    fn redeclaring_replaces() {
        let mut index = OwnershipIndex::new();
        index.apply_owners("a", parse_owners("approvers: [alice]\nreviewers: [bob]").unwrap());
        index.apply_owners("a", parse_owners("approvers: [carol]").unwrap());

        assert_eq!(index.declared(Role::Approver, "a"), Some(&set(&["carol"])));
        assert_eq!(index.declared(Role::Reviewer, "a"), None);
    }

    #[test]
    fn declare_empty_removes() {
        let mut index = OwnershipIndex::new();
        index.declare(Role::Reviewer, "a", set(&["bob"]));
        index.declare(Role::Reviewer, "a", UsernameSet::new());
        assert!(index.declared(Role::Reviewer, "a").is_none());
    }
}
