//! Pre-release tags: `alpha-1`, `beta-2`, `rc-3`

use crate::error::{CoreError, CoreResult};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Known milestones, in release order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Milestone {
    Alpha,
    Beta,
    ReleaseCandidate,
}

impl Milestone {
    pub const ALL: [Milestone; 3] = [Milestone::Alpha, Milestone::Beta, Milestone::ReleaseCandidate];

    pub fn label(self) -> &'static str {
        match self {
            Milestone::Alpha => "alpha",
            Milestone::Beta => "beta",
            Milestone::ReleaseCandidate => "rc",
        }
    }

    pub fn weight(self) -> u32 {
        match self {
            Milestone::Alpha => 1,
            Milestone::Beta => 2,
            Milestone::ReleaseCandidate => 3,
        }
    }

    /// Exact, case-sensitive label lookup
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == label)
    }
}

/// A milestone label with a weight and a positive sequence number.
///
/// Ordered and compared by `(weight, sequence_number)`; the label only
/// affects the rendered name.
#[derive(Debug, Clone)]
pub struct PreReleaseTag {
    milestone: String,
    weight: u32,
    sequence_number: u32,
    separator: String,
}

impl PreReleaseTag {
    pub fn new(
        milestone: &str,
        weight: u32,
        sequence_number: u32,
        separator: &str,
    ) -> CoreResult<Self> {
        if milestone.trim().is_empty() {
            return Err(CoreError::invalid_version(
                "A milestone name is required for a pre-release tag",
            ));
        }
        if weight == 0 || sequence_number == 0 {
            return Err(CoreError::invalid_version(
                "A valid weight and/or sequence is required",
            ));
        }
        Ok(Self {
            milestone: milestone.to_string(),
            weight,
            sequence_number,
            separator: separator.to_string(),
        })
    }

    /// Tag for one of the built-in milestones
    pub fn for_milestone(
        milestone: Milestone,
        sequence_number: u32,
        separator: &str,
    ) -> CoreResult<Self> {
        Self::new(milestone.label(), milestone.weight(), sequence_number, separator)
    }

    pub fn milestone(&self) -> &str {
        &self.milestone
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn sequence_number(&self) -> u32 {
        self.sequence_number
    }
}

impl PartialEq for PreReleaseTag {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PreReleaseTag {}

impl Hash for PreReleaseTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.weight, self.sequence_number).hash(state);
    }
}

impl PartialOrd for PreReleaseTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PreReleaseTag {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.weight, self.sequence_number).cmp(&(other.weight, other.sequence_number))
    }
}

impl fmt::Display for PreReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.milestone, self.separator, self.sequence_number)
    }
}

/// Parses the tag portion of a version name
pub trait PreReleaseTagDeserializer: Send + Sync {
    fn deserialize(&self, tag_string: &str) -> CoreResult<Option<PreReleaseTag>>;
}

/// `<milestone><separator><sequence>` over the built-in [`Milestone`]s
#[derive(Debug, Clone)]
pub struct DefaultPreReleaseTagDeserializer {
    separator: String,
}

impl DefaultPreReleaseTagDeserializer {
    pub fn new(separator: &str) -> CoreResult<Self> {
        if separator.is_empty() {
            return Err(CoreError::invalid_version("The tag separator cannot be empty"));
        }
        Ok(Self {
            separator: separator.to_string(),
        })
    }
}

impl PreReleaseTagDeserializer for DefaultPreReleaseTagDeserializer {
    fn deserialize(&self, tag_string: &str) -> CoreResult<Option<PreReleaseTag>> {
        let parts: Vec<&str> = tag_string.split(self.separator.as_str()).collect();
        let [label, sequence] = parts.as_slice() else {
            return Ok(None);
        };

        let Some(milestone) = Milestone::from_label(label) else {
            return Ok(None);
        };
        if !sequence.starts_with(|c: char| c.is_ascii_digit() && c != '0')
            || !sequence.chars().all(|c| c.is_ascii_digit())
        {
            return Ok(None);
        }
        let Ok(sequence_number) = sequence.parse::<u32>() else {
            return Ok(None);
        };

        PreReleaseTag::for_milestone(milestone, sequence_number, &self.separator).map(Some)
    }
}
