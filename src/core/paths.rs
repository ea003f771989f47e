//! core::paths
//!
//! Directory keys used by the ownership tables.
//!
//! # Key Format
//!
//! A directory key is a `/`-separated path relative to the tree root. The root
//! itself is the empty string. Every key stored in an index and every key looked
//! up during resolution goes through [`normalize`], so `"."`, `"./"` and `""`
//! all address the root, and `"a/b/"` addresses the same directory as `"a/b"`.
//!
//! # Example
//!
//! ```
//! use repoowners::core::paths::{normalize, parent, dir_of};
//!
//! assert_eq!(normalize("./foo//bar/"), "foo/bar");
//! assert_eq!(normalize("."), "");
//!
//! assert_eq!(parent("foo/bar"), Some("foo"));
//! assert_eq!(parent("foo"), Some(""));
//! assert_eq!(parent(""), None);
//!
//! assert_eq!(dir_of("foo/bar/main.rs"), "foo/bar");
//! assert_eq!(dir_of("README.md"), "");
//! ```

use std::borrow::Cow;
use std::path::{Component, Path};

/// The root directory key.
pub const ROOT: &str = "";

/// Characters that separate path segments in query input.
///
/// `\` is a legal file name character on Unix, so it only splits on Windows.
#[cfg(windows)]
const SEPARATORS: &[char] = &['/', '\\'];
#[cfg(not(windows))]
const SEPARATORS: &[char] = &['/'];

/// Normalize a path into a directory key.
///
/// Strips `.` segments and empty segments (leading, trailing or repeated `/`).
/// On Windows `\` also separates segments. `..` segments are kept as-is.
/// Borrows when the input is already normalized.
pub fn normalize(path: &str) -> Cow<'_, str> {
    if is_normalized(path) {
        return Cow::Borrowed(path);
    }

    let joined = path
        .split(SEPARATORS)
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");
    Cow::Owned(joined)
}

fn is_normalized(path: &str) -> bool {
    if path.is_empty() {
        return true;
    }
    !path.contains(|c: char| c != '/' && SEPARATORS.contains(&c))
        && path
            .split('/')
            .all(|segment| !segment.is_empty() && segment != ".")
}

/// The parent of a normalized directory key.
///
/// Returns `None` for the root; a top-level directory's parent is the root.
pub fn parent(dir: &str) -> Option<&str> {
    if dir.is_empty() {
        return None;
    }
    match dir.rfind('/') {
        Some(idx) => Some(&dir[..idx]),
        None => Some(ROOT),
    }
}

/// Iterate from `dir` up to and including the root.
pub fn ancestors(dir: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(Some(dir), |current: &&str| parent(*current))
}

/// The directory key containing a file path.
pub fn dir_of(file: &str) -> String {
    let normalized = normalize(file);
    parent(&normalized).unwrap_or(ROOT).to_string()
}

/// Convert a filesystem path relative to a tree root into a directory key.
///
/// Non-UTF-8 components are converted lossily.
pub fn key_from_relative(relative: &Path) -> String {
    let mut parts: Vec<Cow<'_, str>> = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy()),
            Component::ParentDir => parts.push(Cow::Borrowed("..")),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts.join("/")
}
