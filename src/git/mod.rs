//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations a
//! release needs, allowing for a real `git2`-backed implementation and a mock
//! implementation for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! # Usage
//!
//! Most code should depend on the [Repository] trait rather than concrete
//! implementations.
//!
//! ```rust
//! # use shipit::git::Repository;
//! # use shipit::domain::{CommitCategory, TagPattern};
//! # fn example<R: Repository>(repo: &R) -> shipit::Result<()> {
//! let latest = repo.latest_tag(&TagPattern::default())?;
//! let features = repo.log(CommitCategory::Minor, latest.as_deref())?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::cmp::Ordering;

use crate::domain::{CommitCategory, CommitRecord, TagPattern};
use crate::error::Result;

/// Common git operation trait for abstraction
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync`: history reads for the different
/// commit categories run in parallel against the same repository.
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to the appropriate
/// [crate::error::ShipitError] variants. No method retries on failure.
pub trait Repository: Send + Sync {
    /// Fetch tags from the release remote so local history can be compared
    /// against released versions.
    fn fetch_tags(&self) -> Result<()>;

    /// Name of the newest tag on the release remote that follows `pattern`.
    ///
    /// Tags are ordered by version, not by name or date. Returns `Ok(None)`
    /// when the remote has no matching tag.
    fn latest_tag(&self, pattern: &TagPattern) -> Result<Option<String>>;

    /// Commits whose subject classifies as `category`, newest first.
    ///
    /// With `since` set, only commits in `since..HEAD` are returned;
    /// otherwise the whole history reachable from HEAD is searched.
    fn log(&self, category: CommitCategory, since: Option<&str>) -> Result<Vec<CommitRecord>>;

    /// Create a lightweight tag on the current HEAD commit
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Push a tag to the release remote
    fn push_tag(&self, name: &str) -> Result<()>;

    /// Delete a tag from the local repository
    fn delete_local_tag(&self, name: &str) -> Result<()>;

    /// Delete a tag from the release remote
    fn delete_remote_tag(&self, name: &str) -> Result<()>;
}

/// Compare tag names the way `git tag --sort=v:refname` does: runs of digits
/// compare numerically, everything else byte-wise.
pub fn compare_version_names(a: &str, b: &str) -> Ordering {
    let mut left = chunks(a);
    let mut right = chunks(b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = match (is_numeric(l), is_numeric(r)) {
                    (true, true) => compare_numeric(l, r),
                    _ => l.cmp(r),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

/// Newest tag among `tags` that follows `pattern`
pub fn newest_matching_tag<'a, I>(tags: I, pattern: &TagPattern) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    tags.into_iter()
        .filter(|tag| pattern.version_part(tag).is_some())
        .max_by(|a, b| compare_version_names(a, b))
}

fn is_numeric(chunk: &str) -> bool {
    chunk.bytes().all(|b| b.is_ascii_digit())
}

fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Split into alternating digit / non-digit runs
fn chunks(s: &str) -> impl Iterator<Item = &str> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let digit = first.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != digit)
            .unwrap_or(rest.len());
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(chunk)
    })
}
