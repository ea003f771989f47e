//! aliases command - Print the alias table

use std::collections::BTreeMap;
use std::process::ExitCode;

use anyhow::Result;

use crate::cli::Context;
use crate::core::types::UsernameSet;
use crate::ui::output;

/// Print every alias and its members, sorted by alias name.
pub fn aliases(ctx: &Context) -> Result<ExitCode> {
    let owners = ctx.load_owners()?;
    let table: BTreeMap<&str, &UsernameSet> = owners
        .index()
        .aliases()
        .iter()
        .map(|(name, members)| (name.as_str(), members))
        .collect();

    if ctx.json {
        output::json(&table)?;
        return Ok(ExitCode::SUCCESS);
    }

    if table.is_empty() {
        output::note("No aliases defined", ctx.verbosity);
    }
    output::block(&output::render_aliases(table));
    Ok(ExitCode::SUCCESS)
}
