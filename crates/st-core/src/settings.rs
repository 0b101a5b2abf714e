//! Per-run settings derived from configuration

use crate::delta::ScriptCategory;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where bidirectional scripts go relative to the regular scripts of an output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BidirectionalOrder {
    /// Written before the regular scripts
    First,
    /// Written after the regular scripts
    #[default]
    Last,
    /// Left out of the output
    Exclude,
}

impl BidirectionalOrder {
    /// FIRST and LAST both include bidirectional scripts
    pub fn includes_bidirectional(self) -> bool {
        !matches!(self, BidirectionalOrder::Exclude)
    }
}

impl fmt::Display for BidirectionalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidirectionalOrder::First => write!(f, "first"),
            BidirectionalOrder::Last => write!(f, "last"),
            BidirectionalOrder::Exclude => write!(f, "exclude"),
        }
    }
}

impl FromStr for BidirectionalOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(BidirectionalOrder::First),
            "last" => Ok(BidirectionalOrder::Last),
            "exclude" => Ok(BidirectionalOrder::Exclude),
            other => Err(CoreError::ResourceError {
                message: format!(
                    "Unknown bidirectional script order '{other}', expected first, last or exclude"
                ),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for BidirectionalOrder {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Settings consumed by the composer and the script writers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationScriptSettings {
    pub upgrade_order: BidirectionalOrder,
    pub rollback_order: BidirectionalOrder,
    pub change_log_table_name: String,
    pub statement_delimiter: String,
    pub statement_separator: String,
}

impl MigrationScriptSettings {
    /// Placement policy for the given output category
    pub fn order_for(&self, category: ScriptCategory) -> BidirectionalOrder {
        match category {
            ScriptCategory::Rollback => self.rollback_order,
            _ => self.upgrade_order,
        }
    }
}

impl Default for MigrationScriptSettings {
    fn default() -> Self {
        Self {
            upgrade_order: BidirectionalOrder::Last,
            rollback_order: BidirectionalOrder::Last,
            change_log_table_name: "change_log".to_string(),
            statement_delimiter: String::new(),
            statement_separator: String::new(),
        }
    }
}

/// How delta scripts are laid out inside a version directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaScriptDirectorySettings {
    pub rollback_scripts_must_exist: bool,
    pub extension: String,
    pub upgrade_directory_name: String,
    pub rollback_directory_name: String,
    pub bidirectional_directory_name: String,
}

impl DeltaScriptDirectorySettings {
    /// Subdirectory holding scripts of `category`
    pub fn directory_name(&self, category: ScriptCategory) -> &str {
        match category {
            ScriptCategory::Upgrade => &self.upgrade_directory_name,
            ScriptCategory::Rollback => &self.rollback_directory_name,
            ScriptCategory::Bidirectional => &self.bidirectional_directory_name,
        }
    }
}

impl Default for DeltaScriptDirectorySettings {
    fn default() -> Self {
        Self {
            rollback_scripts_must_exist: false,
            extension: ".sql".to_string(),
            upgrade_directory_name: "upgrade".to_string(),
            rollback_directory_name: "rollback".to_string(),
            bidirectional_directory_name: "bidirectional".to_string(),
        }
    }
}

/// Used when resolving the latest version of a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VersionServiceSettings {
    /// Skip directories whose names are not versions instead of failing
    pub ignore_invalid_versions: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_parses_case_insensitively() {
        assert_eq!("FIRST".parse::<BidirectionalOrder>().unwrap(), BidirectionalOrder::First);
        assert_eq!(" last ".parse::<BidirectionalOrder>().unwrap(), BidirectionalOrder::Last);
        assert_eq!("Exclude".parse::<BidirectionalOrder>().unwrap(), BidirectionalOrder::Exclude);
        assert!("middle".parse::<BidirectionalOrder>().is_err());
    }

    #[test]
    fn test_order_deserializes_from_yaml() {
        let order: BidirectionalOrder = serde_yaml::from_str("EXCLUDE").unwrap();
        assert_eq!(order, BidirectionalOrder::Exclude);
        assert!(serde_yaml::from_str::<BidirectionalOrder>("sideways").is_err());
    }

    #[test]
    fn test_order_includes_bidirectional() {
        assert!(BidirectionalOrder::First.includes_bidirectional());
        assert!(BidirectionalOrder::Last.includes_bidirectional());
        assert!(!BidirectionalOrder::Exclude.includes_bidirectional());
    }

    #[test]
    fn test_defaults() {
        let settings = MigrationScriptSettings::default();
        assert_eq!(settings.upgrade_order, BidirectionalOrder::Last);
        assert_eq!(settings.rollback_order, BidirectionalOrder::Last);
        assert_eq!(settings.change_log_table_name, "change_log");

        let dirs = DeltaScriptDirectorySettings::default();
        assert!(!dirs.rollback_scripts_must_exist);
        assert_eq!(dirs.extension, ".sql");
        assert_eq!(dirs.directory_name(ScriptCategory::Upgrade), "upgrade");
        assert_eq!(dirs.directory_name(ScriptCategory::Bidirectional), "bidirectional");
    }

    #[test]
    fn test_order_for_category() {
        let settings = MigrationScriptSettings {
            upgrade_order: BidirectionalOrder::First,
            rollback_order: BidirectionalOrder::Exclude,
            ..Default::default()
        };
        assert_eq!(settings.order_for(ScriptCategory::Upgrade), BidirectionalOrder::First);
        assert_eq!(settings.order_for(ScriptCategory::Rollback), BidirectionalOrder::Exclude);
    }
}
