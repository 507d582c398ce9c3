//! Remote release publishing
//!
//! A [ReleasePublisher] turns a pushed tag plus rendered notes into a release
//! on the hosting service and returns the release's URL.

pub mod github;
pub mod mock;

pub use github::GitHubPublisher;
pub use mock::MockPublisher;

use crate::error::Result;

/// Publishes a release for an already-pushed tag
pub trait ReleasePublisher: Send + Sync {
    /// Create the release and return its public URL.
    ///
    /// Fails with [crate::error::ShipitError::RemoteRelease] when the remote
    /// does not confirm the release was created. Never retried.
    fn publish_release(&self, tag: &str, title: &str, body: &str) -> Result<String>;
}

impl<T: ReleasePublisher + ?Sized> ReleasePublisher for &T {
    fn publish_release(&self, tag: &str, title: &str, body: &str) -> Result<String> {
        (**self).publish_release(tag, title, body)
    }
}

/// Owner and repository name of a hosted repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl RepoSlug {
    /// Parse `owner/repo` out of a remote URL.
    ///
    /// Accepts scp-like (`git@github.com:owner/repo.git`) and URL forms
    /// (`https://github.com/owner/repo`, `ssh://git@host/owner/repo.git`).
    pub fn from_remote_url(url: &str) -> Option<Self> {
        let url = url.trim().trim_end_matches('/');
        let path = match url.split_once("://") {
            Some((_, rest)) => rest.split_once('/')?.1,
            None => url.split_once(':')?.1,
        };

        let path = path.strip_suffix(".git").unwrap_or(path);
        let mut segments = path.rsplit('/').filter(|s| !s.is_empty());
        let repo = segments.next()?;
        let owner = segments.next()?;

        Some(RepoSlug {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}
