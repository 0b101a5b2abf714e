//! Configuration types and parsing for stitch YAML files
//!
//! A configuration file holds three sections. `general` applies to every
//! run; `database/engine/<name>` and `version-schemes/<name>` are selected
//! per run by the engine and scheme names given on the command line.

use crate::error::{CoreError, CoreResult};
use crate::settings::{
    BidirectionalOrder, DeltaScriptDirectorySettings, MigrationScriptSettings,
    VersionServiceSettings,
};
use crate::version::{Semver1VersionDeserializer, VersionDeserializer, VersionWithTagDeserializer};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::{Path, PathBuf};

/// Configuration bundled with the binary, used when no file is given
const BUILTIN_CONFIG: &str = include_str!("default_config.yaml");

/// Scheme used when none is named
pub const DEFAULT_VERSION_SCHEME: &str = "default-standard";

/// The `general` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GeneralSettings {
    pub rollback_scripts_optional: bool,
    pub delta_script_extension: String,
    pub upgrade_directory_name: String,
    pub rollback_directory_name: String,
    pub bidirectional_directory_name: String,
    pub bidirectional_script_to_upgrade_script_order: BidirectionalOrder,
    pub bidirectional_script_to_rollback_script_order: BidirectionalOrder,
    pub ignore_invalid_versions: bool,

    /// Templates here take precedence over the built-in ones
    #[serde(default)]
    pub template_override_directory: Option<PathBuf>,
}

impl GeneralSettings {
    pub fn delta_directory_settings(&self) -> DeltaScriptDirectorySettings {
        DeltaScriptDirectorySettings {
            rollback_scripts_must_exist: !self.rollback_scripts_optional,
            extension: self.delta_script_extension.clone(),
            upgrade_directory_name: self.upgrade_directory_name.clone(),
            rollback_directory_name: self.rollback_directory_name.clone(),
            bidirectional_directory_name: self.bidirectional_directory_name.clone(),
        }
    }

    pub fn version_service_settings(&self) -> VersionServiceSettings {
        VersionServiceSettings {
            ignore_invalid_versions: self.ignore_invalid_versions,
        }
    }

    /// Combine with the selected engine's settings
    pub fn migration_script_settings(&self, engine: &EngineSettings) -> MigrationScriptSettings {
        MigrationScriptSettings {
            upgrade_order: self.bidirectional_script_to_upgrade_script_order,
            rollback_order: self.bidirectional_script_to_rollback_script_order,
            change_log_table_name: engine.change_log_table_name.clone(),
            statement_delimiter: engine.db_statement_delimiter.clone(),
            statement_separator: engine.db_statement_separator.clone(),
        }
    }
}

/// A `database/engine/<name>` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EngineSettings {
    pub change_log_table_name: String,
    pub db_statement_delimiter: String,
    pub db_statement_separator: String,
}

/// Fields of a `scheme: standard` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StandardSchemeSettings {
    pub prefix: String,
    pub prefix_separator: String,
    pub digit_separator: String,
    pub tag_separator: String,
    pub tag_sequence_separator: String,
}

/// Fields of a `scheme: semver1` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Semver1SchemeSettings {
    pub digit_separator: String,
    pub date_separator: String,
    /// chrono strftime syntax
    pub date_format: String,
}

/// A `version-schemes/<name>` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSchemeSettings {
    Standard(StandardSchemeSettings),
    Semver1(Semver1SchemeSettings),
}

impl VersionSchemeSettings {
    /// Build the directory-name deserializer for this scheme
    pub fn version_deserializer(&self) -> CoreResult<Box<dyn VersionDeserializer>> {
        Ok(match self {
            VersionSchemeSettings::Standard(s) => Box::new(VersionWithTagDeserializer::standard(
                &s.prefix,
                &s.prefix_separator,
                &s.digit_separator,
                &s.tag_separator,
                &s.tag_sequence_separator,
            )?),
            VersionSchemeSettings::Semver1(s) => Box::new(Semver1VersionDeserializer::new(
                &s.digit_separator,
                &s.date_separator,
                &s.date_format,
            )?),
        })
    }

    /// `standard` or `semver1`
    pub fn scheme_name(&self) -> &'static str {
        match self {
            VersionSchemeSettings::Standard(_) => "standard",
            VersionSchemeSettings::Semver1(_) => "semver1",
        }
    }
}

/// A parsed configuration document
#[derive(Debug, Clone)]
pub struct StitchConfig {
    root: Value,
}

impl StitchConfig {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.is_file() {
            return Err(CoreError::ResourceError {
                message: format!("Configuration file does not exist: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        log::debug!("Loaded configuration from {}", path.display());
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str) -> CoreResult<Self> {
        let root: Value = serde_yaml::from_str(content)?;
        if !root.is_mapping() {
            return Err(CoreError::ResourceError {
                message: "Configuration must be a YAML mapping".to_string(),
            });
        }
        Ok(Self { root })
    }

    /// The bundled default configuration
    pub fn builtin() -> CoreResult<Self> {
        Self::from_yaml_str(BUILTIN_CONFIG)
    }

    /// Load `path` if given, else the bundled default
    pub fn load_or_builtin(path: Option<&Path>) -> CoreResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    pub fn general(&self) -> CoreResult<GeneralSettings> {
        let section = self.required_section(&["general"])?;
        typed_section("general", section)
    }

    pub fn engine(&self, name: &str) -> CoreResult<EngineSettings> {
        let section = self.required_section(&["database", "engine", name])?;
        typed_section(&format!("database/engine/{name}"), section)
    }

    pub fn version_scheme(&self, name: &str) -> CoreResult<VersionSchemeSettings> {
        let key = format!("version-schemes/{name}");
        let section = self.required_section(&["version-schemes", name])?;

        match section.get("scheme").and_then(Value::as_str) {
            Some("standard") => Ok(VersionSchemeSettings::Standard(typed_section(&key, section)?)),
            Some("semver1") => Ok(VersionSchemeSettings::Semver1(typed_section(&key, section)?)),
            _ => Err(CoreError::invalid_version(format!(
                "Unsupported version scheme: {name}"
            ))),
        }
    }

    /// Engine names under `database/engine`, sorted
    pub fn engine_names(&self) -> Vec<String> {
        self.section_keys(&["database", "engine"])
    }

    /// Scheme names under `version-schemes`, sorted
    pub fn version_scheme_names(&self) -> Vec<String> {
        self.section_keys(&["version-schemes"])
    }

    fn section(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(&self.root, |node, key| node.get(*key))
    }

    fn required_section(&self, path: &[&str]) -> CoreResult<&Value> {
        self.section(path)
            .filter(|v| v.is_mapping())
            .ok_or_else(|| {
                CoreError::missing_resource(format!(
                    "Configuration section '{}' is missing",
                    path.join("/")
                ))
            })
    }

    fn section_keys(&self, path: &[&str]) -> Vec<String> {
        let mut keys: Vec<String> = self
            .section(path)
            .and_then(Value::as_mapping)
            .map(|m| m.keys().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

fn typed_section<T: DeserializeOwned>(key: &str, section: &Value) -> CoreResult<T> {
    serde_yaml::from_value(section.clone())
        .map_err(|e| CoreError::missing_resource(format!("Invalid configuration in '{key}': {e}")))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
