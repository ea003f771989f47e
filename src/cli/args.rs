//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--root <dir>`: Load the tree from a local directory (default: cwd)
//! - `--remote <host/org/repo[:branch]>`: Load the tree from a cached remote
//! - `--config <file>`: Read this config file instead of searching
//! - `--owners-file` / `--aliases-file`: Override declaration file names
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::types::Role;
use crate::git::RemoteSpec;

/// owners - resolve approvers and reviewers from OWNERS files
#[derive(Parser, Debug)]
#[command(name = "owners")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load the tree from this directory
    #[arg(long, global = true, value_name = "DIR", conflicts_with = "remote")]
    pub root: Option<PathBuf>,

    /// Load the tree from a remote, e.g. github.com/org/repo:main
    #[arg(long, global = true, value_name = "REMOTE")]
    pub remote: Option<RemoteSpec>,

    /// Clone URL for --remote (defaults to https://<host>/<org>/<repo>.git)
    #[arg(long, global = true, value_name = "URL", requires = "remote")]
    pub remote_url: Option<String>,

    /// Directory for cached remote mirrors
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Config file to use instead of the default search
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Name of per-directory declaration files
    #[arg(long, global = true, value_name = "NAME")]
    pub owners_file: Option<String>,

    /// Name of the root alias file
    #[arg(long, global = true, value_name = "NAME")]
    pub aliases_file: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the approvers of each path
    #[command(after_help = "\
EXAMPLES:
    # Approvers of a directory
    owners approvers pkg/api

    # Approvers of the directory containing a file
    owners approvers --file pkg/api/types.go

    # Several paths at once, as JSON
    owners --json approvers pkg/api docs")]
    Approvers(QueryArgs),

    /// Print the reviewers of each path
    Reviewers(QueryArgs),

    /// Print the required reviewers of each path
    RequiredReviewers(QueryArgs),

    /// Test whether a user holds a role at a path
    #[command(long_about = "Test whether a user holds a role at a path.\n\n\
            Prints true or false. The exit status is 0 when the user holds the \
            role and 1 when they do not, so the command can gate scripts.")]
    Check {
        /// User to test
        user: String,

        /// Directory (or file, with --file) to test against
        path: String,

        /// Role to test
        #[arg(long, value_enum, default_value_t = RoleArg::Approver)]
        role: RoleArg,

        /// Treat the path as a file and use its directory
        #[arg(long)]
        file: bool,
    },

    /// Print the alias table
    Aliases,

    /// Summarize the loaded tree
    Info,

    /// Generate shell completion scripts
    #[command(after_help = "\
INSTALLATION:
    # Bash
    owners completion bash > ~/.local/share/bash-completion/completions/owners

    # Zsh
    owners completion zsh > ~/.zfunc/_owners

    # Fish
    owners completion fish > ~/.config/fish/completions/owners.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments shared by the role query commands.
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Directories (or files, with --file) to resolve
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<String>,

    /// Treat paths as files and use their directories
    #[arg(long)]
    pub file: bool,
}

/// Role selector for `check`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoleArg {
    Approver,
    Reviewer,
    RequiredReviewer,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Approver => Role::Approver,
            RoleArg::Reviewer => Role::Reviewer,
            RoleArg::RequiredReviewer => Role::RequiredReviewer,
        }
    }
}

/// Supported shells for completion.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
