//! cli::context
//!
//! Per-invocation settings shared by all command handlers.

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::core::owners::Owners;
use crate::git::{RemoteSpec, RepoCache};
use crate::ui::output::{self, Verbosity};

/// Where the tree comes from.
#[derive(Debug, Clone)]
pub enum Source {
    /// A local directory; `None` means the current directory.
    Local(Option<PathBuf>),
    /// A remote materialized through the repository cache.
    Remote(RemoteSpec),
}

/// Execution context for a command.
#[derive(Debug)]
pub struct Context {
    /// Output verbosity.
    pub verbosity: Verbosity,
    /// Emit JSON instead of text.
    pub json: bool,
    /// Effective configuration with flags applied.
    pub config: Config,
    /// Tree source.
    pub source: Source,
}

impl Context {
    /// Load the ownership tree named by the source.
    pub fn load_owners(&self) -> Result<Owners> {
        let filenames = self.config.filenames();
        match &self.source {
            Source::Local(root) => {
                let root = match root {
                    Some(root) => root.clone(),
                    None => std::env::current_dir().context("Failed to determine current directory")?,
                };
                output::debug(format!("loading tree from {}", root.display()), self.verbosity);
                Owners::load_local(&root, &filenames)
                    .with_context(|| format!("Failed to load ownership tree at {}", root.display()))
            }
            Source::Remote(spec) => {
                let cache = RepoCache::new(self.config.cache_dir());
                output::debug(
                    format!("loading {} via cache {}", spec, cache.dir().display()),
                    self.verbosity,
                );
                Owners::load_remote(&cache, spec, &filenames)
                    .with_context(|| format!("Failed to load ownership tree from {}", spec))
            }
        }
    }
}
