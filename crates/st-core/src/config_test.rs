use super::*;
use crate::version::Version;
use std::fs;
use tempfile::tempdir;

const MINIMAL: &str = r#"
general:
  rollback-scripts-optional: false
  delta-script-extension: ".ddl"
  upgrade-directory-name: up
  rollback-directory-name: down
  bidirectional-directory-name: both
  bidirectional-script-to-upgrade-script-order: FIRST
  bidirectional-script-to-rollback-script-order: exclude
  ignore-invalid-versions: true
  template-override-directory: /opt/templates
database:
  engine:
    oracle:
      change-log-table-name: migrations
      db-statement-delimiter: "/"
      db-statement-separator: ";"
version-schemes:
  release:
    scheme: standard
    prefix: "rel"
    prefix-separator: "_"
    digit-separator: "."
    tag-separator: "-"
    tag-sequence-separator: "."
  stamped:
    scheme: semver1
    digit-separator: "."
    date-separator: "+"
    date-format: "%Y%m%d"
  broken:
    scheme: calver
"#;

#[test]
fn test_builtin_config_is_complete() {
    let config = StitchConfig::builtin().unwrap();
    let general = config.general().unwrap();
    assert!(general.rollback_scripts_optional);
    assert_eq!(general.delta_script_extension, ".sql");
    assert_eq!(general.template_override_directory, None);

    assert_eq!(config.engine_names(), ["mssql", "mysql", "postgresql"]);
    for engine in config.engine_names() {
        config.engine(&engine).unwrap();
    }
    assert_eq!(
        config.version_scheme_names(),
        ["default-standard", "prefixed-standard", "semver1"]
    );
    for scheme in config.version_scheme_names() {
        config.version_scheme(&scheme).unwrap().version_deserializer().unwrap();
    }
    assert!(config.version_scheme_names().iter().any(|s| s == DEFAULT_VERSION_SCHEME));
}

#[test]
fn test_general_section_maps_to_settings() {
    let config = StitchConfig::from_yaml_str(MINIMAL).unwrap();
    let general = config.general().unwrap();

    let dirs = general.delta_directory_settings();
    assert!(dirs.rollback_scripts_must_exist);
    assert_eq!(dirs.extension, ".ddl");
    assert_eq!(dirs.upgrade_directory_name, "up");
    assert_eq!(dirs.rollback_directory_name, "down");
    assert_eq!(dirs.bidirectional_directory_name, "both");

    assert!(general.version_service_settings().ignore_invalid_versions);
    assert_eq!(general.template_override_directory, Some(PathBuf::from("/opt/templates")));

    let engine = config.engine("oracle").unwrap();
    let settings = general.migration_script_settings(&engine);
    assert_eq!(settings.upgrade_order, BidirectionalOrder::First);
    assert_eq!(settings.rollback_order, BidirectionalOrder::Exclude);
    assert_eq!(settings.change_log_table_name, "migrations");
    assert_eq!(settings.statement_delimiter, "/");
    assert_eq!(settings.statement_separator, ";");
}

#[test]
fn test_standard_scheme_builds_prefixed_deserializer() {
    let config = StitchConfig::from_yaml_str(MINIMAL).unwrap();
    let scheme = config.version_scheme("release").unwrap();
    assert_eq!(scheme.scheme_name(), "standard");

    let deserializer = scheme.version_deserializer().unwrap();
    let version = deserializer.deserialize("rel_1.4-beta.2").unwrap().unwrap();
    assert!(matches!(version, Version::Tagged(_)));
    assert_eq!(version.name(), "rel_1.4-beta.2");
    assert!(deserializer.deserialize("1.4").unwrap().is_none());
}

#[test]
fn test_semver1_scheme() {
    let config = StitchConfig::from_yaml_str(MINIMAL).unwrap();
    let scheme = config.version_scheme("stamped").unwrap();
    assert_eq!(scheme.scheme_name(), "semver1");
    let version = scheme
        .version_deserializer()
        .unwrap()
        .deserialize("2.0.1+20240131")
        .unwrap()
        .unwrap();
    assert!(matches!(version, Version::Semver1(_)));
}

#[test]
fn test_unknown_scheme_is_invalid_version() {
    let config = StitchConfig::from_yaml_str(MINIMAL).unwrap();
    let err = config.version_scheme("broken").unwrap_err();
    assert!(matches!(err, CoreError::InvalidVersion { .. }), "got {err}");
}

#[test]
fn test_missing_sections_are_missing_resources() {
    let config = StitchConfig::from_yaml_str(MINIMAL).unwrap();
    assert_eq!(config.engine("mssql").unwrap_err().code(), 1001);
    assert_eq!(config.version_scheme("nope").unwrap_err().code(), 1001);

    let no_general = StitchConfig::from_yaml_str("database: {}").unwrap();
    assert_eq!(no_general.general().unwrap_err().code(), 1001);
}

#[test]
fn test_missing_key_is_missing_resource() {
    let yaml = r#"
database:
  engine:
    mssql:
      change-log-table-name: change_log
      db-statement-separator: ""
"#;
    let config = StitchConfig::from_yaml_str(yaml).unwrap();
    let err = config.engine("mssql").unwrap_err();
    assert!(matches!(err, CoreError::MissingResource { .. }));
    assert!(err.to_string().contains("db-statement-delimiter"), "got {err}");
}

#[test]
fn test_invalid_order_value_is_rejected() {
    let yaml = MINIMAL.replace("order: FIRST", "order: sideways");
    let config = StitchConfig::from_yaml_str(&yaml).unwrap();
    assert_eq!(config.general().unwrap_err().code(), 1001);
}

#[test]
fn test_non_mapping_document_is_rejected() {
    assert!(StitchConfig::from_yaml_str("- a\n- b\n").is_err());
    assert!(matches!(
        StitchConfig::from_yaml_str("general: [").unwrap_err(),
        CoreError::YamlParse(_)
    ));
}

#[test]
fn test_load_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stitch.yaml");
    fs::write(&path, MINIMAL).unwrap();

    let config = StitchConfig::load(&path).unwrap();
    assert_eq!(config.engine_names(), ["oracle"]);

    let err = StitchConfig::load(&dir.path().join("missing.yaml")).unwrap_err();
    assert_eq!(err.code(), 1000);
}

#[test]
fn test_load_or_builtin() {
    let config = StitchConfig::load_or_builtin(None).unwrap();
    assert!(config.engine("mssql").is_ok());
}
