//! Main workflow orchestration logic
//!
//! The release workflow lives here rather than in main.rs, so it can be
//! driven by tests with mock repositories and publishers.

use crate::analyzer::{collect_commits, latest_release, plan, LatestRelease, ReleasePlan};
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{CategorizedCommits, Version};
use crate::error::{Result, ShipitError};
use crate::git::Repository;
use crate::notes;
use crate::publish::ReleasePublisher;
use crate::release::{ReleaseOrchestrator, ReleaseState};
use crate::ui;

/// Arguments for the release workflow
///
/// Mirrors the CLI flags that affect the workflow itself, decoupled from
/// clap so the workflow can be called programmatically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseWorkflowArgs {
    /// Plan and render notes, but create, push and publish nothing
    pub dry_run: bool,
}

/// Outcome of a release workflow that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowResult {
    /// A release was tagged, pushed and published
    Released {
        version: Version,
        tag: String,
        url: String,
    },
    /// Nothing changed since the latest release
    NoChanges,
    /// Dry run: the release that would have been made
    DryRun { version: Version, notes: String },
}

/// Everything decided before the first mutation
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRelease {
    pub latest: Option<LatestRelease>,
    pub version: Version,
    pub commits: CategorizedCommits,
    pub notes: String,
}

/// Planning half of the workflow: fetch, find the latest release, collect
/// commits, plan the version and render notes.
///
/// A dry run skips the tag fetch, so nothing in the local repository is
/// touched; the latest release tag must then already exist locally.
///
/// Returns `Ok(None)` when there is nothing to release.
pub fn prepare_release<R>(
    repo: &R,
    config: &Config,
    args: &ReleaseWorkflowArgs,
) -> Result<Option<PreparedRelease>>
where
    R: Repository + ?Sized,
{
    let pattern = config.tag_pattern()?;

    if args.dry_run {
        ui::display_status("Dry run: using local tags without fetching");
    } else {
        ui::display_status(&format!("Fetching tags from '{}'...", config.remote));
        if let Err(e) = repo.fetch_tags() {
            tracing::warn!(remote = %config.remote, error = %e, "tag fetch failed");
            ui::display_boundary_warning(&BoundaryWarning::FetchFailed {
                remote: config.remote.clone(),
                reason: e.to_string(),
            });
        }
    }

    let latest = latest_release(repo, &pattern)?;
    if let Some(latest) = &latest {
        ui::display_status(&format!("Latest release: {}", latest.tag));
    }

    let since = latest.as_ref().map(|l| l.tag.as_str());
    let commits = collect_commits(repo, since)?;
    ui::display_found_categories(&commits);

    let planned = plan(latest.as_ref().map(|l| &l.version), &commits)?;
    let version = match planned {
        ReleasePlan::Next(version) => version,
        ReleasePlan::NoRelease => {
            ui::display_boundary_warning(&BoundaryWarning::NoChangesDetected {
                latest_tag: latest.map(|l| l.tag),
            });
            return Ok(None);
        }
    };

    if latest.is_none() {
        ui::display_boundary_warning(&BoundaryWarning::NoPreviousRelease {
            initial_version: version.to_string(),
        });
    }

    let notes = notes::render(&version, &commits);
    Ok(Some(PreparedRelease {
        latest,
        version,
        commits,
        notes,
    }))
}

/// Main release workflow
///
/// 1. Fetch tags from the release remote (failure only warns; skipped on a
///    dry run)
/// 2. Find the latest release and collect the commits since it
/// 3. Plan the next version; stop when there is nothing to release
/// 4. Render the release notes
/// 5. Unless dry-running, tag, push and publish as one transaction
///
/// `publisher` is only called once a release is certain and not a dry run,
/// so a missing token never blocks planning.
///
/// # Errors
///
/// Any fatal error of the steps above. When the transaction could not roll
/// itself back completely, the manual cleanup needed is printed before the
/// error is returned.
pub fn run_release_workflow<R, P, F>(
    repo: &R,
    publisher: F,
    config: &Config,
    args: &ReleaseWorkflowArgs,
) -> Result<WorkflowResult>
where
    R: Repository + ?Sized,
    P: ReleasePublisher,
    F: FnOnce() -> Result<P>,
{
    let Some(prepared) = prepare_release(repo, config, args)? else {
        return Ok(WorkflowResult::NoChanges);
    };

    let pattern = config.tag_pattern()?;
    let tag = pattern.format(&prepared.version);

    match &prepared.latest {
        Some(latest) => ui::display_header(&format!(
            "Release {} -> {}",
            latest.version, prepared.version
        )),
        None => ui::display_header(&format!("Initial release {}", prepared.version)),
    }

    if args.dry_run {
        ui::display_status(&format!("Dry run: would create and push tag '{}'", tag));
        ui::display_notes(&prepared.notes);
        return Ok(WorkflowResult::DryRun {
            version: prepared.version,
            notes: prepared.notes,
        });
    }

    let publisher = publisher()?;
    let mut orchestrator = ReleaseOrchestrator::new(repo, &publisher, pattern);

    ui::display_status(&format!("Releasing {}...", tag));
    match orchestrator.execute(&prepared.version, &prepared.notes) {
        Ok(url) => {
            ui::display_success(&format!("Published {}: {}", tag, url));
            Ok(WorkflowResult::Released {
                version: prepared.version,
                tag,
                url,
            })
        }
        Err(e) => {
            report_failure(&e, &orchestrator, &tag, &config.remote);
            Err(e)
        }
    }
}

fn report_failure<R, P>(
    error: &ShipitError,
    orchestrator: &ReleaseOrchestrator<'_, R, P>,
    tag: &str,
    remote: &str,
) where
    R: Repository + ?Sized,
    P: ReleasePublisher + ?Sized,
{
    match (error, orchestrator.state()) {
        (ShipitError::Compensation { failures, .. }, _) => {
            ui::display_manual_cleanup(tag, remote, failures);
        }
        (_, ReleaseState::Failed) if orchestrator.left_local_tag() => {
            ui::display_boundary_warning(&BoundaryWarning::LocalTagLeftBehind {
                tag: tag.to_string(),
            });
        }
        (_, ReleaseState::RolledBack) => {
            ui::display_status(&format!("Rolled back tag '{}'", tag));
        }
        _ => {}
    }
}
