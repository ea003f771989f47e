//! git::remote
//!
//! Remote repository identifiers.
//!
//! # Format
//!
//! `host/org/repo[:branch]`, e.g. `github.com/kubernetes/test-infra:master`.
//! Without a branch the remote's default branch is checked out.
//!
//! # Example
//!
//! ```
//! use repoowners::git::RemoteSpec;
//!
//! let spec: RemoteSpec = "github.com/acme/widgets:main".parse().unwrap();
//! assert_eq!(spec.id(), "github.com/acme/widgets");
//! assert_eq!(spec.branch(), Some("main"));
//! assert_eq!(spec.url(), "https://github.com/acme/widgets.git");
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::errors::GitError;

/// A remote repository and optional branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteSpec {
    host: String,
    org: String,
    repo: String,
    branch: Option<String>,
    url: Option<String>,
}

impl RemoteSpec {
    /// Create a spec from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::InvalidSpec`] if any part is empty or is a `.`/`..`
    /// segment, or contains a `/`.
    pub fn new(
        host: impl Into<String>,
        org: impl Into<String>,
        repo: impl Into<String>,
        branch: Option<String>,
    ) -> Result<Self, GitError> {
        let spec = Self {
            host: host.into(),
            org: org.into(),
            repo: repo.into(),
            branch: branch.filter(|b| !b.is_empty()),
            url: None,
        };
        for part in [&spec.host, &spec.org, &spec.repo] {
            if part.is_empty() || part == "." || part == ".." || part.contains(['/', '\\']) {
                return Err(GitError::InvalidSpec(spec.to_string()));
            }
        }
        Ok(spec)
    }

    /// Fetch from `url` instead of the URL derived from host/org/repo.
    ///
    /// Used for mirrors and local `file://` remotes; the cache layout and lock
    /// key still come from host/org/repo.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Lock and cache key: `host/org/repo`.
    pub fn id(&self) -> String {
        format!("{}/{}/{}", self.host, self.org, self.repo)
    }

    /// Branch to check out, if one was requested.
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    /// URL to clone and fetch from.
    pub fn url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("https://{}/{}/{}.git", self.host, self.org, self.repo),
        }
    }

    /// Mirror location relative to the cache directory.
    pub fn mirror_relpath(&self) -> PathBuf {
        PathBuf::from(&self.host)
            .join(&self.org)
            .join(format!("{}.git", self.repo))
    }
}

impl fmt::Display for RemoteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.org, self.repo)?;
        if let Some(branch) = &self.branch {
            write!(f, ":{}", branch)?;
        }
        Ok(())
    }
}

impl FromStr for RemoteSpec {
    type Err = GitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, branch) = match s.split_once(':') {
            Some((path, branch)) => (path, Some(branch.to_string())),
            None => (s, None),
        };
        let parts: Vec<&str> = path.trim_end_matches('/').split('/').collect();
        match parts.as_slice() {
            [host, org, repo] => {
                let repo = repo.strip_suffix(".git").unwrap_or(repo);
                Self::new(*host, *org, repo, branch)
                    .map_err(|_| GitError::InvalidSpec(s.to_string()))
            }
            _ => Err(GitError::InvalidSpec(s.to_string())),
        }
    }
}
