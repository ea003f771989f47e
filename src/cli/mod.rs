//! cli
//!
//! Command-line interface layer for the `owners` binary.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the log subscriber
//! - Resolve configuration (defaults < config file < flags)
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Loading and resolution live in [`crate::core`]; the
//! handlers only pick a tree source, call [`crate::core::owners::Owners`] and
//! format the answer.

pub mod args;
pub mod commands;
mod context;

pub use args::{Cli, Shell};
pub use context::{Context, Source};

use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::core::config::{Config, FileConfig};
use crate::ui::output::Verbosity;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`. The returned code is
/// the process exit status for successful runs; errors are reported by the
/// caller.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    init_tracing(verbosity);

    let config = Config::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(FileConfig {
            owners_filename: cli.owners_file.clone(),
            aliases_filename: cli.aliases_file.clone(),
            cache_dir: cli.cache_dir.clone(),
        })
        .context("Invalid command-line overrides")?;

    let source = match cli.remote.clone() {
        Some(spec) => Source::Remote(match &cli.remote_url {
            Some(url) => spec.with_url(url.clone()),
            None => spec,
        }),
        None => Source::Local(cli.root.clone()),
    };

    let ctx = Context {
        verbosity,
        json: cli.json,
        config,
        source,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Install a stderr `fmt` subscriber. `RUST_LOG` overrides the flag-derived level.
fn init_tracing(verbosity: Verbosity) {
    let default_level = match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Debug => "debug",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
