use std::fmt;

/// Non-fatal conditions met while preparing or running a release.
/// These are reported to the user but never abort the run on their own.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No commits since the latest release
    NoChangesDetected { latest_tag: Option<String> },
    /// The remote carries no release tag yet; the initial version is used
    NoPreviousRelease { initial_version: String },
    /// Fetching tags failed; remote listing and local history are used as-is
    FetchFailed { remote: String, reason: String },
    /// The release tag was created locally but never reached the remote
    LocalTagLeftBehind { tag: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoChangesDetected {
                latest_tag: Some(tag),
            } => write!(f, "No changes detected since '{}'", tag),
            BoundaryWarning::NoChangesDetected { latest_tag: None } => {
                write!(f, "No changes detected")
            }
            BoundaryWarning::NoPreviousRelease { initial_version } => write!(
                f,
                "No previous release found, starting at {}",
                initial_version
            ),
            BoundaryWarning::FetchFailed { remote, reason } => write!(
                f,
                "Could not fetch tags from remote '{}': {}",
                remote, reason
            ),
            BoundaryWarning::LocalTagLeftBehind { tag } => write!(
                f,
                "Tag '{}' exists only locally; remove it with `git tag -d {}` before retrying",
                tag, tag
            ),
        }
    }
}
