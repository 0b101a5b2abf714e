//! Dotted versions with two to four numeric components

use super::{Version, VersionDeserializer};
use crate::error::{CoreError, CoreResult};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// `major.minor[.build[.revision]]`, joined by a configurable separator.
///
/// A missing trailing component sorts before a present one, so `1.0 < 1.0.0`.
#[derive(Debug, Clone)]
pub struct FourDigitVersion {
    separator: String,
    major: u32,
    minor: u32,
    build: Option<u32>,
    revision: Option<u32>,
    name: String,
}

impl FourDigitVersion {
    /// Create a version, rejecting a revision without a build and an empty separator
    pub fn new(
        separator: &str,
        major: u32,
        minor: u32,
        build: Option<u32>,
        revision: Option<u32>,
    ) -> CoreResult<Self> {
        if separator.is_empty() {
            return Err(CoreError::invalid_version("Digit separator cannot be empty"));
        }
        if build.is_none() && revision.is_some() {
            return Err(CoreError::invalid_version(
                "A revision number cannot exist without a build number",
            ));
        }

        let mut name = format!("{major}{separator}{minor}");
        if let Some(build) = build {
            name.push_str(separator);
            name.push_str(&build.to_string());
            if let Some(revision) = revision {
                name.push_str(separator);
                name.push_str(&revision.to_string());
            }
        }

        Ok(Self {
            separator: separator.to_string(),
            major,
            minor,
            build,
            revision,
            name,
        })
    }

    /// Two-component version
    pub fn major_minor(separator: &str, major: u32, minor: u32) -> CoreResult<Self> {
        Self::new(separator, major, minor, None, None)
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn build(&self) -> Option<u32> {
        self.build
    }

    pub fn revision(&self) -> Option<u32> {
        self.revision
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Canonical name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// See [`Version::compare_to`]
    pub fn compare_to(&self, other: Option<&Version>) -> Ordering {
        match other {
            Some(Version::FourDigit(other)) => self.cmp(other),
            _ => Ordering::Greater,
        }
    }

    fn key(&self) -> (u32, u32, Option<u32>, Option<u32>) {
        (self.major, self.minor, self.build, self.revision)
    }
}

impl PartialEq for FourDigitVersion {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for FourDigitVersion {}

impl Hash for FourDigitVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for FourDigitVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FourDigitVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // `None < Some(_)` gives the "absent sorts first" rule
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for FourDigitVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Parses [`FourDigitVersion`]s, ignoring trailing text after the last
/// component it can read.
#[derive(Debug, Clone)]
pub struct FourDigitVersionDeserializer {
    separator: String,
}

impl FourDigitVersionDeserializer {
    pub fn new(separator: &str) -> CoreResult<Self> {
        if separator.is_empty() {
            return Err(CoreError::invalid_version("Digit separator cannot be empty"));
        }
        Ok(Self {
            separator: separator.to_string(),
        })
    }

    /// Parse into the concrete type
    pub fn parse(&self, version_string: &str) -> CoreResult<Option<FourDigitVersion>> {
        let sep = self.separator.as_str();

        let Some((major, rest)) = next_number(version_string)? else {
            return Ok(None);
        };
        let Some(rest) = rest.strip_prefix(sep) else {
            return Ok(None);
        };
        let Some((minor, rest)) = next_number(rest)? else {
            return Ok(None);
        };
        if rest.is_empty() {
            return FourDigitVersion::major_minor(sep, major, minor).map(Some);
        }

        let Some(build_rest) = rest.strip_prefix(sep).filter(|r| starts_with_digit(r)) else {
            log::debug!("'{version_string}' contains an additional value that is not a build number");
            return FourDigitVersion::major_minor(sep, major, minor).map(Some);
        };
        let Some((build, rest)) = next_number(build_rest)? else {
            return FourDigitVersion::major_minor(sep, major, minor).map(Some);
        };
        if rest.is_empty() {
            return FourDigitVersion::new(sep, major, minor, Some(build), None).map(Some);
        }

        let Some(revision_rest) = rest.strip_prefix(sep).filter(|r| starts_with_digit(r)) else {
            log::debug!(
                "'{version_string}' contains an additional value that is not a revision number"
            );
            return FourDigitVersion::new(sep, major, minor, Some(build), None).map(Some);
        };
        let Some((revision, _)) = next_number(revision_rest)? else {
            return FourDigitVersion::new(sep, major, minor, Some(build), None).map(Some);
        };
        FourDigitVersion::new(sep, major, minor, Some(build), Some(revision)).map(Some)
    }
}

impl VersionDeserializer for FourDigitVersionDeserializer {
    fn deserialize(&self, version_string: &str) -> CoreResult<Option<Version>> {
        Ok(self.parse(version_string)?.map(Version::FourDigit))
    }
}

fn starts_with_digit(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Split off the leading run of ASCII digits.
///
/// `Ok(None)` when `s` does not start with a digit; an error for a
/// multi-digit token with a leading zero, or one that overflows `u32`.
fn next_number(s: &str) -> CoreResult<Option<(u32, &str)>> {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    if end == 0 {
        return Ok(None);
    }

    let digits = &s[..end];
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(CoreError::invalid_version(format!(
            "Invalid version digits '{digits}': cannot start with a 0"
        )));
    }
    let value = digits.parse::<u32>().map_err(|_| {
        CoreError::invalid_version(format!("Version component '{digits}' is out of range"))
    })?;
    Ok(Some((value, &s[end..])))
}

#[cfg(test)]
#[path = "four_digit_test.rs"]
mod tests;
