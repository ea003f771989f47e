//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`UsernameSet`] - Unordered set of unique identity strings
//! - [`Role`] - Approver, reviewer or required reviewer
//! - [`DirectoryOptions`] - Per-directory inheritance options
//!
//! # Examples
//!
//! ```
//! use repoowners::core::types::{Role, UsernameSet};
//!
//! let a = UsernameSet::from_iter(["alice", "bob"]);
//! let b = UsernameSet::from_iter(["bob", "charlie"]);
//!
//! let merged = a.union(&b);
//! assert_eq!(merged.list(), vec!["alice", "bob", "charlie"]);
//! assert_eq!(merged.to_string(), r#"{"alice", "bob", "charlie"}"#);
//!
//! assert_eq!("required-reviewer".parse::<Role>().unwrap(), Role::RequiredReviewer);
//! ```

use std::collections::hash_set::{self, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid role '{0}', must be one of: approver, reviewer, required-reviewer")]
    InvalidRole(String),
}

/// A set of identity strings.
///
/// Members are opaque: any string is accepted, nothing is validated. Order
/// carries no meaning, but [`UsernameSet::list`] and the `Display` rendering are
/// sorted so output is deterministic.
///
/// [`UsernameSet::union`] always allocates a fresh set; neither operand is
/// shared with or mutated by the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsernameSet(HashSet<String>);

impl UsernameSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add usernames to the set.
    pub fn add<I, S>(&mut self, usernames: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(usernames.into_iter().map(Into::into));
    }

    /// Add a single username. Returns true if it was not already present.
    pub fn insert(&mut self, username: impl Into<String>) -> bool {
        self.0.insert(username.into())
    }

    /// Delete usernames from the set. Absent names are ignored.
    pub fn delete<I, S>(&mut self, usernames: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for username in usernames {
            self.0.remove(username.as_ref());
        }
    }

    /// Return a new set holding the members of both sets.
    pub fn union(&self, other: &UsernameSet) -> UsernameSet {
        let mut result = HashSet::with_capacity(self.0.len() + other.0.len());
        result.extend(self.0.iter().cloned());
        result.extend(other.0.iter().cloned());
        UsernameSet(result)
    }

    /// Add every member of `other` to this set in place.
    pub fn extend_from(&mut self, other: &UsernameSet) {
        self.0.extend(other.0.iter().cloned());
    }

    /// Check whether `username` is a member.
    pub fn has(&self, username: &str) -> bool {
        self.0.contains(username)
    }

    /// Members as a sorted list.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.0.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Remove and return an arbitrary member, or `None` if the set is empty.
    pub fn pop(&mut self) -> Option<String> {
        let key = self.0.iter().next()?.clone();
        self.0.take(&key)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over members in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for UsernameSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, name) in self.list().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}", name)?;
        }
        f.write_str("}")
    }
}

impl<S: Into<String>> FromIterator<S> for UsernameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = UsernameSet::new();
        set.add(iter);
        set
    }
}

impl IntoIterator for UsernameSet {
    type Item = String;
    type IntoIter = hash_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for UsernameSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.list())
    }
}

impl<'de> Deserialize<'de> for UsernameSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        Ok(names.into_iter().collect())
    }
}

/// One of the three independent resolution namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Approver,
    Reviewer,
    RequiredReviewer,
}

impl Role {
    /// All roles, in table order.
    pub const ALL: [Role; 3] = [Role::Approver, Role::Reviewer, Role::RequiredReviewer];

    /// Stable textual name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Approver => "approver",
            Role::Reviewer => "reviewer",
            Role::RequiredReviewer => "required-reviewer",
        }
    }

    /// Dense index into per-role tables.
    pub(crate) fn index(self) -> usize {
        match self {
            Role::Approver => 0,
            Role::Reviewer => 1,
            Role::RequiredReviewer => 2,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approver" | "approvers" => Ok(Role::Approver),
            "reviewer" | "reviewers" => Ok(Role::Reviewer),
            "required-reviewer" | "required-reviewers" | "required_reviewers" => {
                Ok(Role::RequiredReviewer)
            }
            other => Err(TypeError::InvalidRole(other.to_string())),
        }
    }
}

/// Options attached to a directory that carries a declaration file.
///
/// A directory with no entry behaves as `DirectoryOptions::default()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryOptions {
    /// Stop the upward walk at this directory.
    #[serde(default, rename = "no_inherit")]
    pub no_inheritance: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> UsernameSet {
        names.iter().copied().collect()
    }

    #[test]
    fn from_iter_deduplicates() {
        let s = set(&["alice", "bob", "alice"]);
        assert_eq!(s.len(), 2);
        assert!(s.has("alice"));
        assert!(s.has("bob"));
    }

    #[test]
    fn union_allocates_new_set() {
        let a = set(&["alice"]);
        let b = set(&["bob"]);
        let mut u = a.union(&b);
        u.insert("charlie");

        assert_eq!(u.list(), vec!["alice", "bob", "charlie"]);
        assert_eq!(a.list(), vec!["alice"]);
        assert_eq!(b.list(), vec!["bob"]);
    }

    #[test]
    fn union_with_empty() {
        let a = set(&["alice"]);
        assert_eq!(a.union(&UsernameSet::new()), a);
        assert_eq!(UsernameSet::new().union(&a), a);
    }

    #[test]
    fn delete_ignores_missing() {
        let mut s = set(&["alice", "bob"]);
        s.delete(["bob", "nobody"]);
        assert_eq!(s.list(), vec!["alice"]);
    }

    #[test]
    fn pop_drains_set() {
        let mut s = set(&["alice", "bob"]);
        let mut popped = vec![s.pop().unwrap(), s.pop().unwrap()];
        popped.sort();
        assert_eq!(popped, vec!["alice", "bob"]);
        assert!(s.pop().is_none());
        assert!(s.is_empty());
    }

    #[test]
    fn display_is_sorted_and_quoted() {
        let s = set(&["charlie", "alice", "bob"]);
        assert_eq!(s.to_string(), r#"{"alice", "bob", "charlie"}"#);
        assert_eq!(UsernameSet::new().to_string(), "{}");
    }

    #[test]
    fn serde_as_sorted_list() {
        let s = set(&["bob", "alice"]);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"["alice","bob"]"#);

        let parsed: UsernameSet = serde_json::from_str(r#"["bob","alice","bob"]"#).unwrap();
        assert_eq!(parsed, s);
    }

    #[test]
    fn role_parse_and_display() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert_eq!("approvers".parse::<Role>().unwrap(), Role::Approver);
        assert!(matches!(
            "owner".parse::<Role>(),
            Err(TypeError::InvalidRole(_))
        ));
    }

    #[test]
    fn role_serializes_like_display() {
        for role in Role::ALL {
            assert_eq!(serde_json::to_string(&role).unwrap(), format!("\"{}\"", role));
        }
    }

    #[test]
    fn role_indices_are_distinct() {
        let mut seen = [false; 3];
        for role in Role::ALL {
            assert!(!seen[role.index()]);
            seen[role.index()] = true;
        }
    }

    #[test]
    fn directory_options_default_inherits() {
        assert!(!DirectoryOptions::default().no_inheritance);
    }
}
