use std::fmt;

use thiserror::Error;

/// A rollback step that could not be completed
#[derive(Debug)]
pub struct CompensationFailure {
    /// Name of the compensating action (e.g. "delete-remote-tag")
    pub action: &'static str,
    /// The error the action returned
    pub error: ShipitError,
}

impl fmt::Display for CompensationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.action, self.error)
    }
}

/// Unified error type for shipit operations
#[derive(Error, Debug)]
pub enum ShipitError {
    #[error("Latest version is invalid: '{tag}' ({reason})")]
    InvalidPreviousVersion { tag: String, reason: String },

    #[error("Release publishing failed{}: {message}", status.map(|s| format!(" with status {}", s)).unwrap_or_default())]
    RemoteRelease {
        status: Option<u16>,
        message: String,
    },

    #[error("Rollback incomplete after '{source}'; manual cleanup required: {}", format_failures(failures))]
    Compensation {
        source: Box<ShipitError>,
        failures: Vec<CompensationFailure>,
    },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_failures(failures: &[CompensationFailure]) -> String {
    failures
        .iter()
        .map(|failure| failure.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience type alias for Results in shipit
pub type Result<T> = std::result::Result<T, ShipitError>;

impl ShipitError {
    /// Create an invalid previous version error
    pub fn invalid_previous_version(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        ShipitError::InvalidPreviousVersion {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Create a remote release error
    pub fn remote_release(status: Option<u16>, message: impl Into<String>) -> Self {
        ShipitError::RemoteRelease {
            status,
            message: message.into(),
        }
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ShipitError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        ShipitError::Remote(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ShipitError::Config(msg.into())
    }

    /// Whether the error left tags behind that need manual cleanup
    pub fn needs_manual_cleanup(&self) -> bool {
        matches!(self, ShipitError::Compensation { .. })
    }
}
