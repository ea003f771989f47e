//! ui::output
//!
//! Terminal rendering for the `owners` binary.
//!
//! # Streams
//!
//! Answers (resolved sets, check results, alias tables) go to stdout and are
//! printed even with `--quiet`. Notes, warnings and debug lines go to stderr.
//! With `--json`, answers are pretty-printed JSON instead of text.
//!
//! Rendering is split from printing: the `render_*` functions build strings and
//! are what the unit tests exercise.

use std::fmt::Display;

use serde::Serialize;

use crate::core::types::UsernameSet;

/// How chatty the binary is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Answers and errors only.
    Quiet,
    /// Answers, notes and warnings.
    Normal,
    /// Everything, plus `[debug]` lines.
    Debug,
}

impl Verbosity {
    /// `--quiet` wins over `--debug`.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        match (quiet, debug) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Debug,
            (false, false) => Verbosity::Normal,
        }
    }

    fn shows_notes(self) -> bool {
        self != Verbosity::Quiet
    }
}

/// Print one answer line to stdout.
pub fn answer(line: impl Display) {
    println!("{}", line);
}

/// Print a rendered block to stdout, skipping it when empty.
pub fn block(text: &str) {
    if !text.is_empty() {
        println!("{}", text);
    }
}

/// Print `value` as pretty JSON to stdout.
pub fn json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Informational line on stdout, hidden by `--quiet`.
pub fn note(message: impl Display, verbosity: Verbosity) {
    if verbosity.shows_notes() {
        println!("{}", message);
    }
}

/// `warning:` line on stderr, hidden by `--quiet`.
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity.shows_notes() {
        eprintln!("warning: {}", message);
    }
}

/// `[debug]` line on stderr, shown only with `--debug`.
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// `error:` line on stderr.
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Names one per line, each behind `indent`.
pub fn render_names<S: AsRef<str>>(names: &[S], indent: &str) -> String {
    names
        .iter()
        .map(|name| format!("{}{}", indent, name.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolved sets for one or more query paths.
///
/// A single path renders as bare names. Several paths render as a `path:`
/// header per path with its names indented below.
pub fn render_sets<S: AsRef<str>>(sets: &[(&str, Vec<S>)]) -> String {
    if let [(_, names)] = sets {
        return render_names(names, "");
    }

    let mut lines = Vec::new();
    for (path, names) in sets {
        lines.push(format!("{}:", path));
        if !names.is_empty() {
            lines.push(render_names(names, "  "));
        }
    }
    lines.join("\n")
}

/// One `alias: member, member` line per alias, in the order given.
pub fn render_aliases<'a, I>(table: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a UsernameSet)>,
{
    table
        .into_iter()
        .map(|(name, members)| format!("{}: {}", name, members.list().join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> UsernameSet {
        names.iter().copied().collect()
    }

    #[test]
    fn quiet_beats_debug() {
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert!(!Verbosity::Quiet.shows_notes());
    }

    #[test]
    fn single_path_is_bare() {
        let sets = [("pkg/api", vec!["alice", "bob"])];
        assert_eq!(render_sets(&sets), "alice\nbob");
    }

    #[test]
    fn several_paths_get_headers() {
        let sets = [
            ("pkg", vec!["alice".to_string()]),
            ("docs", Vec::new()),
            ("", vec!["bob".to_string(), "carol".to_string()]),
        ];
        assert_eq!(render_sets(&sets), "pkg:\n  alice\ndocs:\n:\n  bob\n  carol");
    }

    #[test]
    fn empty_single_set_renders_nothing() {
        let sets: [(&str, Vec<&str>); 1] = [("x", Vec::new())];
        assert_eq!(render_sets(&sets), "");
    }

    #[test]
    fn alias_lines_sorted_within() {
        let admins = set(&["dave", "carl"]);
        let empty = UsernameSet::new();
        let text = render_aliases([("admins", &admins), ("ghosts", &empty)]);
        assert_eq!(text, "admins: carl, dave\nghosts: ");
    }
}
