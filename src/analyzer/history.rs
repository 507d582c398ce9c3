use rayon::prelude::*;

use crate::domain::{CategorizedCommits, CommitCategory, TagPattern, Version};
use crate::error::Result;
use crate::git::Repository;

/// The released version the next one is planned from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestRelease {
    pub tag: String,
    pub version: Version,
}

/// Find the latest release on the remote.
///
/// Returns `Ok(None)` when no tag follows `pattern`. A matching tag whose
/// version part is not semver is an
/// [crate::error::ShipitError::InvalidPreviousVersion].
pub fn latest_release<R: Repository + ?Sized>(
    repo: &R,
    pattern: &TagPattern,
) -> Result<Option<LatestRelease>> {
    let Some(tag) = repo.latest_tag(pattern)? else {
        tracing::debug!("no release tag found on remote");
        return Ok(None);
    };

    let version = pattern.parse_version(&tag)?;
    tracing::debug!(%tag, %version, "latest release");
    Ok(Some(LatestRelease { tag, version }))
}

/// Collect the commits since `since`, one history read per category.
///
/// The reads are independent and run in parallel; all of them complete
/// before the result is assembled, and the first failure is returned.
pub fn collect_commits<R: Repository + ?Sized>(
    repo: &R,
    since: Option<&str>,
) -> Result<CategorizedCommits> {
    let groups = CommitCategory::ALL
        .par_iter()
        .map(|&category| repo.log(category, since).map(|records| (category, records)))
        .collect::<Vec<_>>();

    let mut commits = CategorizedCommits::new();
    for group in groups {
        let (category, records) = group?;
        tracing::debug!(%category, count = records.len(), "collected commits");
        commits.insert(category, records);
    }

    Ok(commits)
}
