//! The "standard" scheme: an optional prefix, a numeric version and an
//! optional pre-release tag, e.g. `r-1.2.0-rc-1`

use super::tag::{DefaultPreReleaseTagDeserializer, PreReleaseTag, PreReleaseTagDeserializer};
use super::{FourDigitVersionDeserializer, Version, VersionDeserializer};
use crate::error::{CoreError, CoreResult};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

pub const DEFAULT_PREFIX: &str = "";
pub const DEFAULT_PREFIX_SEPARATOR: &str = "";
pub const DEFAULT_DIGIT_SEPARATOR: &str = ".";
pub const DEFAULT_TAG_SEPARATOR: &str = "-";
pub const DEFAULT_TAG_SEQUENCE_SEPARATOR: &str = "-";

/// A version wrapped with a prefix and an optional [`PreReleaseTag`].
///
/// Two tagged versions are equal when their names are equal. A tagged
/// version sorts before the same version without a tag.
#[derive(Debug, Clone)]
pub struct VersionWithTag {
    prefix: String,
    prefix_separator: String,
    version: Box<Version>,
    tag_separator: String,
    tag: Option<PreReleaseTag>,
    name: String,
}

impl VersionWithTag {
    pub fn new(
        prefix: &str,
        prefix_separator: &str,
        version: Version,
        tag_separator: &str,
        tag: Option<PreReleaseTag>,
    ) -> CoreResult<Self> {
        if prefix.is_empty() && !prefix_separator.is_empty() {
            return Err(CoreError::invalid_version(
                "A prefix separator cannot exist without a prefix",
            ));
        }

        let mut name = format!("{prefix}{prefix_separator}{}", version.name());
        if let Some(tag) = &tag {
            name.push_str(tag_separator);
            name.push_str(&tag.to_string());
        }

        Ok(Self {
            prefix: prefix.to_string(),
            prefix_separator: prefix_separator.to_string(),
            version: Box::new(version),
            tag_separator: tag_separator.to_string(),
            tag,
            name,
        })
    }

    /// Wrap without prefix or tag
    pub fn untagged(version: Version) -> Self {
        Self {
            prefix: String::new(),
            prefix_separator: String::new(),
            name: version.name().to_string(),
            version: Box::new(version),
            tag_separator: DEFAULT_TAG_SEPARATOR.to_string(),
            tag: None,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn tag(&self) -> Option<&PreReleaseTag> {
        self.tag.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// See [`Version::compare_to`]
    pub fn compare_to(&self, other: Option<&Version>) -> Ordering {
        let Some(Version::Tagged(other)) = other else {
            return Ordering::Greater;
        };

        self.version
            .compare_to(Some(&other.version))
            .then_with(|| match (&self.tag, &other.tag) {
                (None, None) => Ordering::Equal,
                (Some(a), Some(b)) => a.cmp(b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
            })
    }
}

impl PartialEq for VersionWithTag {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for VersionWithTag {}

impl Hash for VersionWithTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for VersionWithTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Parses [`VersionWithTag`]s by stripping the prefix, delegating the
/// numeric part and then the tag.
pub struct VersionWithTagDeserializer {
    prefix: String,
    prefix_separator: String,
    tag_separator: String,
    version_deserializer: Box<dyn VersionDeserializer>,
    tag_deserializer: Box<dyn PreReleaseTagDeserializer>,
}

impl VersionWithTagDeserializer {
    pub fn new(
        prefix: &str,
        prefix_separator: &str,
        tag_separator: &str,
        version_deserializer: Box<dyn VersionDeserializer>,
        tag_deserializer: Box<dyn PreReleaseTagDeserializer>,
    ) -> CoreResult<Self> {
        if prefix.is_empty() && !prefix_separator.is_empty() {
            return Err(CoreError::invalid_version(
                "A prefix separator cannot exist without a prefix",
            ));
        }
        Ok(Self {
            prefix: prefix.to_string(),
            prefix_separator: prefix_separator.to_string(),
            tag_separator: tag_separator.to_string(),
            version_deserializer,
            tag_deserializer,
        })
    }

    /// Four-digit versions with the default tag format
    pub fn standard(
        prefix: &str,
        prefix_separator: &str,
        digit_separator: &str,
        tag_separator: &str,
        tag_sequence_separator: &str,
    ) -> CoreResult<Self> {
        Self::new(
            prefix,
            prefix_separator,
            tag_separator,
            Box::new(FourDigitVersionDeserializer::new(digit_separator)?),
            Box::new(DefaultPreReleaseTagDeserializer::new(tag_sequence_separator)?),
        )
    }

    /// [`Self::standard`] with every default
    pub fn with_defaults() -> CoreResult<Self> {
        Self::standard(
            DEFAULT_PREFIX,
            DEFAULT_PREFIX_SEPARATOR,
            DEFAULT_DIGIT_SEPARATOR,
            DEFAULT_TAG_SEPARATOR,
            DEFAULT_TAG_SEQUENCE_SEPARATOR,
        )
    }

    /// Parse into the concrete type
    pub fn parse(&self, version_string: &str) -> CoreResult<Option<VersionWithTag>> {
        if version_string.is_empty() {
            return Ok(None);
        }

        let mut rest = version_string;
        if !self.prefix.is_empty() {
            let expected = format!("{}{}", self.prefix, self.prefix_separator);
            let Some(stripped) = rest.strip_prefix(expected.as_str()) else {
                log::debug!("'{version_string}' does not start with the expected prefix '{expected}'");
                return Ok(None);
            };
            rest = stripped;
        }

        let Some(version) = self.version_deserializer.deserialize(rest)? else {
            return Ok(None);
        };
        let Some(after_version) = rest.strip_prefix(version.name()) else {
            log::debug!("'{version_string}' does not start with '{version}', ignoring");
            return Ok(None);
        };

        if after_version.is_empty() {
            return self.build(version, None).map(Some);
        }

        let Some(tag_string) = after_version.strip_prefix(self.tag_separator.as_str()) else {
            log::debug!("'{version_string}' does not use the tag separator '{}'", self.tag_separator);
            return Ok(None);
        };
        let Some(tag) = self.tag_deserializer.deserialize(tag_string)? else {
            log::debug!("'{version_string}' does not contain a valid tag");
            return Ok(None);
        };

        self.build(version, Some(tag)).map(Some)
    }

    fn build(&self, version: Version, tag: Option<PreReleaseTag>) -> CoreResult<VersionWithTag> {
        VersionWithTag::new(
            &self.prefix,
            &self.prefix_separator,
            version,
            &self.tag_separator,
            tag,
        )
    }
}

impl VersionDeserializer for VersionWithTagDeserializer {
    fn deserialize(&self, version_string: &str) -> CoreResult<Option<Version>> {
        Ok(self.parse(version_string)?.map(Version::Tagged))
    }
}

impl fmt::Debug for VersionWithTagDeserializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionWithTagDeserializer")
            .field("prefix", &self.prefix)
            .field("prefix_separator", &self.prefix_separator)
            .field("tag_separator", &self.tag_separator)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "tagged_test.rs"]
mod tests;
