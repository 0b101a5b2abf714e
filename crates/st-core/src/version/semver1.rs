//! `major.minor.patch` followed by a build timestamp

use super::{Version, VersionDeserializer};
use crate::error::{CoreError, CoreResult};
use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt::{self, Write};
use std::hash::{Hash, Hasher};

/// A semantic version stamped with the date-time it was cut, e.g.
/// `1.22.890+20131113144700`.
///
/// Ordered by major, minor, patch and then chronologically by the timestamp.
#[derive(Debug, Clone)]
pub struct Semver1Version {
    major: u32,
    minor: u32,
    patch: u32,
    date: NaiveDateTime,
    name: String,
}

impl Semver1Version {
    /// Create a version; `date_format` uses chrono strftime syntax
    pub fn new(
        digit_separator: &str,
        major: u32,
        minor: u32,
        patch: u32,
        date_separator: &str,
        date_format: &str,
        date: NaiveDateTime,
    ) -> CoreResult<Self> {
        if digit_separator.is_empty() {
            return Err(CoreError::invalid_version("No digit separator provided"));
        }
        if date_separator.is_empty() {
            return Err(CoreError::invalid_version("No date separator provided"));
        }
        validate_date_format(date_format)?;

        let mut name = format!(
            "{major}{digit_separator}{minor}{digit_separator}{patch}{date_separator}"
        );
        write!(name, "{}", date.format(date_format)).map_err(|_| {
            CoreError::invalid_version(format!("Cannot format date with '{date_format}'"))
        })?;

        Ok(Self {
            major,
            minor,
            patch,
            date,
            name,
        })
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn patch(&self) -> u32 {
        self.patch
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    /// Canonical name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// See [`Version::compare_to`]
    pub fn compare_to(&self, other: Option<&Version>) -> Ordering {
        match other {
            Some(Version::Semver1(other)) => self.cmp(other),
            _ => Ordering::Greater,
        }
    }

    fn key(&self) -> (u32, u32, u32, NaiveDateTime) {
        (self.major, self.minor, self.patch, self.date)
    }
}

impl PartialEq for Semver1Version {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Semver1Version {}

impl Hash for Semver1Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Semver1Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Semver1Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Semver1Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Parses [`Semver1Version`]s.
///
/// A timestamp that fails calendar validation (month 13, day 32, ...) makes
/// the name non-conformant rather than an error.
#[derive(Debug, Clone)]
pub struct Semver1VersionDeserializer {
    digit_separator: String,
    date_separator: String,
    date_format: String,
    pattern: Regex,
}

impl Semver1VersionDeserializer {
    pub fn new(digit_separator: &str, date_separator: &str, date_format: &str) -> CoreResult<Self> {
        if digit_separator.is_empty() {
            return Err(CoreError::invalid_version("No digit separator provided"));
        }
        if date_separator.is_empty() {
            return Err(CoreError::invalid_version("No date separator provided"));
        }
        validate_date_format(date_format)?;

        let sep = regex::escape(digit_separator);
        let date_sep = regex::escape(date_separator);
        let pattern = Regex::new(&format!(
            r"^(\d+){sep}(\d+){sep}(\d+){date_sep}(.+)$"
        ))
        .map_err(|e| CoreError::invalid_version(format!("Invalid separator pattern: {e}")))?;

        Ok(Self {
            digit_separator: digit_separator.to_string(),
            date_separator: date_separator.to_string(),
            date_format: date_format.to_string(),
            pattern,
        })
    }

    /// Parse into the concrete type
    pub fn parse(&self, version_string: &str) -> CoreResult<Option<Semver1Version>> {
        let Some(caps) = self.pattern.captures(version_string) else {
            return Ok(None);
        };

        let numbers = (
            caps[1].parse::<u32>(),
            caps[2].parse::<u32>(),
            caps[3].parse::<u32>(),
        );
        let (Ok(major), Ok(minor), Ok(patch)) = numbers else {
            return Ok(None);
        };

        let Some(date) = parse_date_time(&caps[4], &self.date_format) else {
            log::warn!("Invalid date string in version: {version_string}");
            return Ok(None);
        };

        Semver1Version::new(
            &self.digit_separator,
            major,
            minor,
            patch,
            &self.date_separator,
            &self.date_format,
            date,
        )
        .map(Some)
    }
}

impl VersionDeserializer for Semver1VersionDeserializer {
    fn deserialize(&self, version_string: &str) -> CoreResult<Option<Version>> {
        Ok(self.parse(version_string)?.map(Version::Semver1))
    }
}

/// Parse a full date-time, falling back to a date-only format at midnight
fn parse_date_time(value: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, format).ok().or_else(|| {
        NaiveDate::parse_from_str(value, format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    })
}

fn validate_date_format(format: &str) -> CoreResult<()> {
    if format.is_empty() {
        return Err(CoreError::invalid_version("No date format provided"));
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(CoreError::invalid_version(format!(
            "Invalid date format: '{format}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMAT: &str = "%Y%m%d%H%M%S";

    fn deserializer() -> Semver1VersionDeserializer {
        Semver1VersionDeserializer::new(".", "+", FORMAT).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, ss)
            .unwrap()
    }

    #[test]
    fn test_parse_valid_version() {
        let version = deserializer().parse("1.22.890+20131113144700").unwrap().unwrap();
        assert_eq!(version.major(), 1);
        assert_eq!(version.minor(), 22);
        assert_eq!(version.patch(), 890);
        assert_eq!(version.date(), at(2013, 11, 13, 14, 47, 0));
        assert_eq!(version.name(), "1.22.890+20131113144700");
    }

    #[test]
    fn test_invalid_month_yields_none() {
        assert!(deserializer().parse("1.22.890+20131313144700").unwrap().is_none());
    }

    #[test]
    fn test_invalid_day_and_hour_yield_none() {
        assert!(deserializer().parse("1.0.0+20130230120000").unwrap().is_none());
        assert!(deserializer().parse("1.0.0+20130210250000").unwrap().is_none());
    }

    #[test]
    fn test_non_matching_shapes_yield_none() {
        let d = deserializer();
        assert!(d.parse("1.22+20131113144700").unwrap().is_none());
        assert!(d.parse("1.22.890").unwrap().is_none());
        assert!(d.parse("1.22.890-20131113144700").unwrap().is_none());
        assert!(d.parse("v1.22.890+20131113144700").unwrap().is_none());
        assert!(d.parse("1.22.890+").unwrap().is_none());
    }

    #[test]
    fn test_date_only_format() {
        let d = Semver1VersionDeserializer::new(".", "_", "%Y-%m-%d").unwrap();
        let version = d.parse("2.0.1_2020-02-29").unwrap().unwrap();
        assert_eq!(version.date(), at(2020, 2, 29, 0, 0, 0));
        assert_eq!(version.name(), "2.0.1_2020-02-29");
        assert!(d.parse("2.0.1_2021-02-29").unwrap().is_none());
    }

    #[test]
    fn test_ordering_uses_numbers_then_timestamp() {
        let d = deserializer();
        let parse = |s: &str| d.parse(s).unwrap().unwrap();

        assert!(parse("1.0.0+20200101000000") < parse("1.0.1+20100101000000"));
        assert!(parse("1.1.0+20100101000000") > parse("1.0.9+20200101000000"));
        assert!(parse("1.0.0+20200101000000") < parse("1.0.0+20200101000001"));
        assert!(parse("2.0.0+20100101000000") > parse("1.9.9+20991231235959"));
        assert_eq!(
            parse("1.0.0+20200101000000").cmp(&parse("1.0.0+20200101000000")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_round_trip_through_name() {
        let d = deserializer();
        for input in ["0.0.1+19991231235959", "4.12.7+20240229120000"] {
            let version = d.parse(input).unwrap().unwrap();
            assert_eq!(version.name(), input);
            assert_eq!(d.parse(version.name()).unwrap(), Some(version));
        }
    }

    #[test]
    fn test_construction_rejects_empty_separators_and_bad_format() {
        let date = at(2020, 1, 1, 0, 0, 0);
        assert!(Semver1Version::new("", 1, 0, 0, "+", FORMAT, date).is_err());
        assert!(Semver1Version::new(".", 1, 0, 0, "", FORMAT, date).is_err());
        assert!(Semver1Version::new(".", 1, 0, 0, "+", "%Q", date).is_err());
        assert!(Semver1VersionDeserializer::new(".", "+", "").is_err());
    }

    #[test]
    fn test_regex_metacharacter_separators_are_literal() {
        let d = Semver1VersionDeserializer::new("|", "*", FORMAT).unwrap();
        assert!(d.parse("1|2|3*20200101000000").unwrap().is_some());
        assert!(d.parse("1x2x3*20200101000000").unwrap().is_none());
    }
}
