//! Version schemes: value types, ordering and directory-name deserializers
//!
//! Every version directory name is parsed by exactly one [`VersionDeserializer`]
//! per run, so all versions compared within a run belong to the same variant.

pub mod four_digit;
pub mod semver1;
pub mod tag;
pub mod tagged;

use crate::error::CoreResult;
use std::cmp::Ordering;
use std::fmt;

pub use four_digit::{FourDigitVersion, FourDigitVersionDeserializer};
pub use semver1::{Semver1Version, Semver1VersionDeserializer};
pub use tag::{DefaultPreReleaseTagDeserializer, Milestone, PreReleaseTag, PreReleaseTagDeserializer};
pub use tagged::{VersionWithTag, VersionWithTagDeserializer};

/// A parsed version, one variant per scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Version {
    /// `major.minor[.build[.revision]]`
    FourDigit(FourDigitVersion),
    /// `major.minor.patch+timestamp`
    Semver1(Semver1Version),
    /// Another version wrapped with an optional prefix and pre-release tag
    Tagged(VersionWithTag),
}

impl Version {
    /// Canonical name, as produced by the scheme's serializer
    pub fn name(&self) -> &str {
        match self {
            Version::FourDigit(v) => v.name(),
            Version::Semver1(v) => v.name(),
            Version::Tagged(v) => v.name(),
        }
    }

    /// Compare against another version of the same variant.
    ///
    /// A missing `other`, or one of a different variant, always compares as
    /// lesser: `self` wins. This is not antisymmetric across variants, so
    /// only sort collections produced by a single deserializer.
    pub fn compare_to(&self, other: Option<&Version>) -> Ordering {
        match self {
            Version::FourDigit(v) => v.compare_to(other),
            Version::Semver1(v) => v.compare_to(other),
            Version::Tagged(v) => v.compare_to(other),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<FourDigitVersion> for Version {
    fn from(v: FourDigitVersion) -> Self {
        Version::FourDigit(v)
    }
}

impl From<Semver1Version> for Version {
    fn from(v: Semver1Version) -> Self {
        Version::Semver1(v)
    }
}

impl From<VersionWithTag> for Version {
    fn from(v: VersionWithTag) -> Self {
        Version::Tagged(v)
    }
}

/// Parses a version directory name into a [`Version`].
///
/// Returns `Ok(None)` when the name simply does not follow the scheme, and an
/// error only when it follows the scheme but breaks a strict numeric rule.
pub trait VersionDeserializer: Send + Sync {
    /// Deserialize `version_string`
    fn deserialize(&self, version_string: &str) -> CoreResult<Option<Version>>;
}

/// Sort versions ascending with [`Version::compare_to`]
pub fn sort_versions(versions: &mut [Version]) {
    versions.sort_by(|a, b| a.compare_to(Some(b)));
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
