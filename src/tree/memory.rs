//! tree::memory
//!
//! In-memory tree provider.

use std::collections::BTreeMap;

use super::traits::{TreeError, TreeProvider};
use crate::core::paths;

/// A tree held entirely in memory.
///
/// Directory keys are normalized on insert, so `"."` and `""` both name the root.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    owners: BTreeMap<String, Vec<u8>>,
    aliases: Option<Vec<u8>>,
}

impl MemoryTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the declaration file for a directory.
    pub fn with_owners(mut self, dir: &str, content: impl Into<Vec<u8>>) -> Self {
        self.insert_owners(dir, content);
        self
    }

    /// Set the root alias file.
    pub fn with_aliases(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.aliases = Some(content.into());
        self
    }

    /// Add (or replace) the declaration file for a directory in place.
    pub fn insert_owners(&mut self, dir: &str, content: impl Into<Vec<u8>>) {
        self.owners
            .insert(paths::normalize(dir).into_owned(), content.into());
    }
}

impl TreeProvider for MemoryTree {
    fn owners_files(&self) -> Result<Vec<(String, Vec<u8>)>, TreeError> {
        Ok(self
            .owners
            .iter()
            .map(|(dir, bytes)| (dir.clone(), bytes.clone()))
            .collect())
    }

    fn aliases_file(&self) -> Result<Option<Vec<u8>>, TreeError> {
        Ok(self.aliases.clone())
    }

    fn describe(&self) -> String {
        format!("memory tree ({} declaration files)", self.owners.len())
    }
}
