//! check command - Role membership test

use std::process::ExitCode;

use anyhow::Result;
use serde::Serialize;

use super::target_dir;
use crate::cli::Context;
use crate::core::types::Role;
use crate::ui::output;

#[derive(Serialize)]
struct CheckResult<'a> {
    user: &'a str,
    path: &'a str,
    role: Role,
    holds: bool,
}

/// Print whether `user` holds `role` at `path`.
///
/// Exit status is 0 when the user holds the role and 1 otherwise.
pub fn check(ctx: &Context, user: &str, path: &str, role: Role, is_file: bool) -> Result<ExitCode> {
    let owners = ctx.load_owners()?;
    let holds = owners.holds(role, user, &target_dir(path, is_file));

    if ctx.json {
        output::json(&CheckResult {
            user,
            path,
            role,
            holds,
        })?;
    } else {
        output::answer(holds);
    }

    Ok(if holds {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
