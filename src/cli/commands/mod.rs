//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads the tree named by the context
//! 2. Runs its queries against [`crate::core::owners::Owners`]
//! 3. Formats and displays output
//!
//! Handlers return the process exit status; only `check` ever returns a
//! non-zero status without an error.

mod aliases;
mod check;
mod completion;
mod info;
mod query;

// Re-export command functions for testing and direct invocation
pub use aliases::aliases;
pub use check::check;
pub use completion::completion;
pub use info::info;
pub use query::query;

use std::process::ExitCode;

use anyhow::Result;

use crate::cli::args::Command;
use crate::cli::Context;
use crate::core::types::Role;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<ExitCode> {
    match command {
        Command::Approvers(args) => query::query(ctx, Role::Approver, &args.paths, args.file),
        Command::Reviewers(args) => query::query(ctx, Role::Reviewer, &args.paths, args.file),
        Command::RequiredReviewers(args) => {
            query::query(ctx, Role::RequiredReviewer, &args.paths, args.file)
        }
        Command::Check {
            user,
            path,
            role,
            file,
        } => check::check(ctx, &user, &path, role.into(), file),
        Command::Aliases => aliases::aliases(ctx),
        Command::Info => info::info(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// The directory key a command argument refers to.
fn target_dir(path: &str, is_file: bool) -> String {
    if is_file {
        crate::core::paths::dir_of(path)
    } else {
        crate::core::paths::normalize(path).into_owned()
    }
}
