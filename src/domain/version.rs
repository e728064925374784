use crate::domain::tag::{release_components, Tag};
use crate::error::{PublishError, Result};
use std::fmt;

/// Release version taken from a `v<major>.<minor>.<bugfix>` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub bugfix: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, bugfix: u64) -> Self {
        Version {
            major,
            minor,
            bugfix,
        }
    }

    /// Parse version from a release tag name (e.g., "v1.2.3" -> Version(1,2,3))
    ///
    /// Leading zeros are accepted and dropped by integer parsing; components
    /// beyond `u64` are rejected.
    pub fn parse(tag_name: &str) -> Result<Self> {
        let malformed = || PublishError::MalformedVersion(tag_name.to_string());
        let [major, minor, bugfix] = release_components(tag_name).ok_or_else(malformed)?;

        Ok(Version {
            major: major.parse().map_err(|_| malformed())?,
            minor: minor.parse().map_err(|_| malformed())?,
            bugfix: bugfix.parse().map_err(|_| malformed())?,
        })
    }

    /// Name of the tag this version is released under
    pub fn tag_name(&self) -> String {
        format!("v{}", self)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.bugfix)
    }
}

/// Resolve the version carried by a tag the validator has accepted
pub fn resolve(tag: &Tag) -> Result<Version> {
    Version::parse(&tag.name)
}
