//! tree::fs_tree
//!
//! Directory walker over a tree on local disk.
//!
//! # Behavior
//!
//! - Entries are visited in sorted order; symlinks are not followed.
//! - `.git` directories are skipped.
//! - A subdirectory that cannot be listed is skipped with a warning.
//! - A matched declaration file that cannot be read is an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::traits::{Filenames, TreeError, TreeProvider};
use crate::core::paths;

/// A tree rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct FsTree {
    root: PathBuf,
    filenames: Filenames,
}

impl FsTree {
    /// Create a provider for `root` using the given file names.
    pub fn new(root: impl Into<PathBuf>, filenames: Filenames) -> Self {
        Self {
            root: root.into(),
            filenames,
        }
    }

    /// The tree root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file names this provider matches.
    pub fn filenames(&self) -> &Filenames {
        &self.filenames
    }

    fn collect(&self, dir: &Path, out: &mut Vec<(String, Vec<u8>)>) -> Result<(), TreeError> {
        let listing = match fs::read_dir(dir) {
            Ok(listing) => listing,
            Err(e) if dir == self.root => {
                return Err(TreeError::Read {
                    path: dir.to_path_buf(),
                    source: e,
                })
            }
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
                return Ok(());
            }
        };

        let mut entries = Vec::new();
        for entry in listing {
            match entry {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                }
            }
        }
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => {
                    tracing::warn!(path = %entry.path().display(), error = %e, "skipping entry");
                    continue;
                }
            };
            let path = entry.path();

            if file_type.is_dir() {
                if entry.file_name() == ".git" {
                    continue;
                }
                self.collect(&path, out)?;
            } else if file_type.is_file() && entry.file_name() == self.filenames.owners.as_str() {
                let bytes = fs::read(&path).map_err(|e| TreeError::Read {
                    path: path.clone(),
                    source: e,
                })?;
                let relative = dir.strip_prefix(&self.root).unwrap_or(Path::new(""));
                out.push((paths::key_from_relative(relative), bytes));
            }
        }
        Ok(())
    }
}

impl TreeProvider for FsTree {
    fn owners_files(&self) -> Result<Vec<(String, Vec<u8>)>, TreeError> {
        if !self.root.is_dir() {
            return Err(TreeError::NotADirectory(self.root.clone()));
        }
        let mut out = Vec::new();
        self.collect(&self.root, &mut out)?;
        Ok(out)
    }

    fn aliases_file(&self) -> Result<Option<Vec<u8>>, TreeError> {
        let path = self.root.join(&self.filenames.aliases);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TreeError::Read { path, source: e }),
        }
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
