use crate::domain::{CategorizedCommits, CommitCategory, Version, VersionBump};
use crate::error::Result;

/// Outcome of planning a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleasePlan {
    /// Cut a release with this version
    Next(Version),
    /// Nothing release-worthy since the last tag
    NoRelease,
}

impl ReleasePlan {
    pub fn version(&self) -> Option<&Version> {
        match self {
            ReleasePlan::Next(version) => Some(version),
            ReleasePlan::NoRelease => None,
        }
    }
}

/// Bump implied by the categorized commits; first match wins
pub fn decide_bump(commits: &CategorizedCommits) -> Option<VersionBump> {
    if commits.has(CommitCategory::Major) {
        Some(VersionBump::Major)
    } else if commits.has(CommitCategory::Minor) || commits.has(CommitCategory::Docs) {
        Some(VersionBump::Minor)
    } else if commits.has(CommitCategory::Patch) || commits.has(CommitCategory::Other) {
        Some(VersionBump::Patch)
    } else {
        None
    }
}

/// Compute the next version from the current one and the commits since it.
///
/// Without a previous release any change yields [`Version::INITIAL`],
/// whatever its category.
///
/// # Errors
///
/// Fails only when `current` cannot be bumped any further.
pub fn plan(current: Option<&Version>, commits: &CategorizedCommits) -> Result<ReleasePlan> {
    let Some(bump) = decide_bump(commits) else {
        return Ok(ReleasePlan::NoRelease);
    };

    let next = match current {
        Some(version) => version.bump(bump)?,
        None => Version::INITIAL,
    };
    Ok(ReleasePlan::Next(next))
}
