//! approvers / reviewers / required-reviewers commands - Role set queries

use std::collections::BTreeMap;
use std::process::ExitCode;

use anyhow::Result;

use super::target_dir;
use crate::cli::Context;
use crate::core::types::Role;
use crate::ui::output;

/// Print the resolved `role` set of each path.
///
/// One path prints one name per line. Several paths print a `path:` header
/// followed by the indented names. With `--json`, prints an object mapping each
/// argument to its sorted list.
pub fn query(ctx: &Context, role: Role, paths: &[String], is_file: bool) -> Result<ExitCode> {
    let owners = ctx.load_owners()?;

    let resolved: Vec<(&str, Vec<String>)> = paths
        .iter()
        .map(|path| {
            let set = owners.resolve(role, &target_dir(path, is_file));
            let names = set.list().into_iter().map(str::to_string).collect();
            (path.as_str(), names)
        })
        .collect();

    if ctx.json {
        let map: BTreeMap<&str, &Vec<String>> =
            resolved.iter().map(|(path, names)| (*path, names)).collect();
        output::json(&map)?;
        return Ok(ExitCode::SUCCESS);
    }

    for (path, names) in &resolved {
        if names.is_empty() {
            output::warn(format!("no {}s for '{}'", role, path), ctx.verbosity);
        }
    }
    output::block(&output::render_sets(&resolved));

    output::debug(
        format!("resolution cache: {:?}", owners.cache().stats()),
        ctx.verbosity,
    );
    Ok(ExitCode::SUCCESS)
}
