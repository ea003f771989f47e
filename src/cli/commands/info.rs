//! info command - Summarize the loaded tree

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::{Context, Source};
use crate::core::types::Role;
use crate::ui::output;

#[derive(Serialize)]
struct Summary {
    source: String,
    base: Option<String>,
    owners_file: String,
    aliases_file: String,
    directories: usize,
    aliases: usize,
    approver_dirs: usize,
    reviewer_dirs: usize,
    required_reviewer_dirs: usize,
    head: Option<String>,
}

/// Print where the tree came from and what it declares.
pub fn info(ctx: &Context) -> Result<ExitCode> {
    let owners = ctx.load_owners()?;
    let filenames = ctx.config.filenames();
    let index = owners.index();

    let head = match owners.checkout() {
        Some(checkout) => checkout
            .log()
            .context("Failed to read checkout history")?
            .into_iter()
            .next(),
        None => None,
    };

    let summary = Summary {
        source: match &ctx.source {
            Source::Local(_) => "local".to_string(),
            Source::Remote(spec) => spec.to_string(),
        },
        base: owners.base().map(|p| p.display().to_string()),
        owners_file: filenames.owners,
        aliases_file: filenames.aliases,
        directories: index.directory_count(),
        aliases: index.aliases().len(),
        approver_dirs: index.role_table(Role::Approver).len(),
        reviewer_dirs: index.role_table(Role::Reviewer).len(),
        required_reviewer_dirs: index.role_table(Role::RequiredReviewer).len(),
        head,
    };

    if ctx.json {
        output::json(&summary)?;
        return Ok(ExitCode::SUCCESS);
    }

    output::answer(format!("Source:       {}", summary.source));
    if let Some(base) = &summary.base {
        output::answer(format!("Tree:         {}", base));
    }
    if let Some(head) = &summary.head {
        output::answer(format!("Head:         {}", head));
    }
    output::answer(format!(
        "Files:        {} / {}",
        summary.owners_file, summary.aliases_file
    ));
    output::answer(format!("Directories:  {}", summary.directories));
    output::answer(format!("Aliases:      {}", summary.aliases));
    output::answer(format!(
        "Declaring:    {} approver, {} reviewer, {} required-reviewer",
        summary.approver_dirs, summary.reviewer_dirs, summary.required_reviewer_dirs
    ));
    if let Some(path) = ctx.config.loaded_from() {
        output::note(format!("Config:       {}", path.display()), ctx.verbosity);
    }
    Ok(ExitCode::SUCCESS)
}
