use crate::error::{Result, ShipitError};
use std::cmp::Ordering;
use std::fmt;

use semver::Prerelease;

/// Semantic version representation
///
/// Build metadata is dropped on parse; a pre-release label is kept because it
/// changes how the version is bumped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Prerelease,
}

impl Version {
    /// Version used for the very first release of a project
    pub const INITIAL: Version = Version::new(0, 1, 0);

    /// Create a new release (non pre-release) version
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre: Prerelease::EMPTY,
        }
    }

    /// Parse a semantic version such as `1.2.3`, `1.3.0-rc.1` or `1.2.3+build.5`.
    pub fn parse(input: &str) -> Result<Self> {
        let parsed = semver::Version::parse(input)
            .map_err(|e| ShipitError::invalid_previous_version(input, e.to_string()))?;

        Ok(Version {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            pre: parsed.pre,
        })
    }

    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }

    /// Bump version according to bump type.
    ///
    /// A pre-release is bumped to its own release when that release already
    /// satisfies the bump: `2.0.0-rc.1` goes to `2.0.0` on a major bump,
    /// `1.3.0-rc.1` to `1.3.0` on a minor bump, and any pre-release to its
    /// release on a patch bump. The result never carries a pre-release.
    ///
    /// # Errors
    ///
    /// [ShipitError::InvalidPreviousVersion] when the component to increment
    /// is already `u64::MAX`.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let pre = self.is_prerelease();
        let next = match bump_type {
            VersionBump::Major if pre && self.minor == 0 && self.patch == 0 => {
                Version::new(self.major, 0, 0)
            }
            VersionBump::Major => Version::new(self.increment(self.major, bump_type)?, 0, 0),
            VersionBump::Minor if pre && self.patch == 0 => {
                Version::new(self.major, self.minor, 0)
            }
            VersionBump::Minor => {
                Version::new(self.major, self.increment(self.minor, bump_type)?, 0)
            }
            VersionBump::Patch if pre => Version::new(self.major, self.minor, self.patch),
            VersionBump::Patch => Version::new(
                self.major,
                self.minor,
                self.increment(self.patch, bump_type)?,
            ),
        };
        Ok(next)
    }

    fn increment(&self, component: u64, bump_type: VersionBump) -> Result<u64> {
        component.checked_add(1).ok_or_else(|| {
            ShipitError::invalid_previous_version(
                self.to_string(),
                format!("{} component cannot be incremented", bump_type),
            )
        })
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (self.pre.is_empty(), other.pre.is_empty()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => self.pre.cmp(&other.pre),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.is_prerelease() {
            write!(f, "-{}", self.pre)?;
        }
        Ok(())
    }
}

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        };
        f.write_str(name)
    }
}
