use crate::domain::Version;
use crate::error::{Result, ShipitError};

const PLACEHOLDER: &str = "{version}";

/// Tag naming pattern (e.g., "{version}", "v{version}", "release-{version}")
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPattern {
    prefix: String,
    suffix: String,
}

impl TagPattern {
    /// Create a new tag pattern; it must contain the `{version}` placeholder once
    pub fn new(pattern: &str) -> Result<Self> {
        match pattern.split_once(PLACEHOLDER) {
            Some((prefix, suffix)) if !suffix.contains(PLACEHOLDER) => Ok(TagPattern {
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            }),
            Some(_) => Err(ShipitError::config(format!(
                "Tag pattern '{}' contains {} more than once",
                pattern, PLACEHOLDER
            ))),
            None => Err(ShipitError::config(format!(
                "Tag pattern '{}' must contain the {} placeholder",
                pattern, PLACEHOLDER
            ))),
        }
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version=1.2.3 -> "v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        format!("{}{}{}", self.prefix, version, self.suffix)
    }

    /// The version part of a tag, if the tag follows this pattern
    pub fn version_part<'a>(&self, tag: &'a str) -> Option<&'a str> {
        tag.strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())
            .filter(|rest| !rest.is_empty())
    }

    /// Parse the version out of a tag that follows this pattern
    pub fn parse_version(&self, tag: &str) -> Result<Version> {
        let part = self.version_part(tag).ok_or_else(|| {
            ShipitError::invalid_previous_version(tag, "tag does not follow the tag pattern")
        })?;
        Version::parse(part).map_err(|e| match e {
            ShipitError::InvalidPreviousVersion { reason, .. } => {
                ShipitError::invalid_previous_version(tag, reason)
            }
            other => other,
        })
    }
}
