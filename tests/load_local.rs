//! Loading ownership trees from local directories.

use assert_fs::prelude::*;
use assert_fs::TempDir;

use repoowners::core::owners::{LoadError, Owners};
use repoowners::core::types::UsernameSet;
use repoowners::tree::{Filenames, FsTree, TreeError, TreeProvider};

fn set(names: &[&str]) -> UsernameSet {
    names.iter().copied().collect()
}

/// Layout mirroring a small monorepo.
fn monorepo() -> TempDir {
    let temp = TempDir::new().unwrap();
    temp.child("OWNERS")
        .write_str("approvers:\n- alice\n- sig-leads\nreviewers:\n- bob\n")
        .unwrap();
    temp.child("OWNERS_ALIASES")
        .write_str("aliases:\n  sig-leads:\n  - carol\n  - dan\n")
        .unwrap();
    temp.child("pkg/api/OWNERS")
        .write_str("approvers:\n- erin\n")
        .unwrap();
    temp.child("vendor/OWNERS")
        .write_str("no_inherit: true\napprovers:\n- vendorbot\n")
        .unwrap();
    temp.child("pkg/api/types.go").write_str("package api\n").unwrap();
    temp
}

#[test]
fn resolves_from_disk() {
    let temp = monorepo();
    let owners = Owners::load_local(temp.path(), &Filenames::default()).unwrap();

    assert_eq!(*owners.approvers(""), set(&["alice", "carol", "dan"]));
    assert_eq!(
        *owners.approvers("pkg/api"),
        set(&["alice", "carol", "dan", "erin"])
    );
    assert_eq!(*owners.approvers("vendor/github.com/x"), set(&["vendorbot"]));
    assert!(owners.reviewers("vendor").is_empty());
    assert_eq!(*owners.reviewers("pkg/api"), set(&["bob"]));
}

#[test]
fn walker_reports_relative_directories() {
    let temp = monorepo();
    let tree = FsTree::new(temp.path(), Filenames::default());

    let mut dirs: Vec<String> = tree
        .owners_files()
        .unwrap()
        .into_iter()
        .map(|(dir, _)| dir)
        .collect();
    dirs.sort();
    assert_eq!(dirs, vec!["", "pkg/api", "vendor"]);
}

#[test]
fn git_directory_is_skipped() {
    let temp = monorepo();
    temp.child(".git/OWNERS")
        .write_str("approvers:\n- intruder\n")
        .unwrap();

    let owners = Owners::load_local(temp.path(), &Filenames::default()).unwrap();
    assert!(!owners.approvers(".git").has("intruder"));
    assert_eq!(owners.index().directory_count(), 3);
}

#[test]
fn custom_filenames() {
    let temp = TempDir::new().unwrap();
    temp.child("CODEOWNERS.yaml")
        .write_str("approvers: [root-team]\n")
        .unwrap();
    temp.child("OWNERS").write_str("approvers: [ignored]\n").unwrap();
    temp.child("TEAMS")
        .write_str("aliases:\n  root-team: [zed]\n")
        .unwrap();

    let filenames = Filenames {
        owners: "CODEOWNERS.yaml".to_string(),
        aliases: "TEAMS".to_string(),
    };
    let owners = Owners::load_local(temp.path(), &filenames).unwrap();
    assert_eq!(*owners.approvers("x"), set(&["zed"]));
}

#[test]
fn aliases_only_read_at_root() {
    let temp = TempDir::new().unwrap();
    temp.child("OWNERS").write_str("approvers: [team]\n").unwrap();
    temp.child("sub/OWNERS_ALIASES")
        .write_str("aliases:\n  team: [nobody]\n")
        .unwrap();

    let owners = Owners::load_local(temp.path(), &Filenames::default()).unwrap();
    assert_eq!(*owners.approvers("sub"), set(&["team"]));
}

#[test]
fn missing_alias_file_is_not_an_error() {
    let temp = TempDir::new().unwrap();
    temp.child("OWNERS").write_str("approvers: [alice]\n").unwrap();

    let owners = Owners::load_local(temp.path(), &Filenames::default()).unwrap();
    assert!(owners.index().aliases().is_empty());
    assert_eq!(owners.base(), Some(temp.path()));
}

#[test]
fn malformed_file_aborts_load() {
    let temp = monorepo();
    temp.child("pkg/broken/OWNERS")
        .write_str("approvers: [unclosed\n")
        .unwrap();

    match Owners::load_local(temp.path(), &Filenames::default()) {
        Err(LoadError::Owners { dir, .. }) => assert_eq!(dir, "pkg/broken"),
        other => panic!("expected parse failure, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn malformed_alias_file_aborts_load() {
    let temp = monorepo();
    temp.child("OWNERS_ALIASES").write_str("aliases: 3\n").unwrap();

    assert!(matches!(
        Owners::load_local(temp.path(), &Filenames::default()),
        Err(LoadError::Aliases { .. })
    ));
}

#[test]
fn missing_root_is_an_error() {
    let temp = TempDir::new().unwrap();
    let result = Owners::load_local(temp.path().join("missing"), &Filenames::default());
    assert!(matches!(
        result,
        Err(LoadError::Tree(TreeError::NotADirectory(_)))
    ));
}

#[test]
fn empty_directory_loads_empty_index() {
    let temp = TempDir::new().unwrap();
    let owners = Owners::load_local(temp.path(), &Filenames::default()).unwrap();
    assert!(owners.index().is_empty());
    assert!(owners.approvers("anything").is_empty());
}

#[cfg(unix)]
#[test]
fn symlinked_directories_are_not_followed() {
    let temp = monorepo();
    let outside = TempDir::new().unwrap();
    outside
        .child("OWNERS")
        .write_str("approvers: [outsider]\n")
        .unwrap();
    std::os::unix::fs::symlink(outside.path(), temp.path().join("linked")).unwrap();

    let owners = Owners::load_local(temp.path(), &Filenames::default()).unwrap();
    assert!(!owners.approvers("linked").has("outsider"));
    assert_eq!(owners.index().directory_count(), 3);
}
