use super::*;
use st_core::{MemoryContentSource, StitchConfig};

const VERSION_DIR: &str = "/in/1.0";

fn version(source: &MemoryContentSource) -> VersionedDirectory {
    let deserializer = StitchConfig::builtin()
        .unwrap()
        .version_scheme("default-standard")
        .unwrap()
        .version_deserializer()
        .unwrap();
    let version = deserializer.deserialize("1.0").unwrap().unwrap();
    VersionedDirectory::new(source, VERSION_DIR, version).unwrap()
}

fn scripts_with(
    source: MemoryContentSource,
    settings: DeltaScriptDirectorySettings,
    category: ScriptCategory,
) -> CoreResult<Vec<DeltaScript>> {
    let version = version(&source);
    let service = DeltaScriptDirectoryService::new(Arc::new(source), settings);
    service.get_scripts(category, &Module::default_module("/in"), &version)
}

fn upgrade_scripts(files: &[&str]) -> CoreResult<Vec<DeltaScript>> {
    let source = files.iter().fold(MemoryContentSource::new().with_dir(VERSION_DIR), |s, f| {
        s.with_file(format!("{VERSION_DIR}/upgrade/{f}"), format!("-- {f}"))
    });
    scripts_with(source, DeltaScriptDirectorySettings::default(), ScriptCategory::Upgrade)
}

#[test]
fn test_scripts_are_ordered_by_sequence_number() {
    let scripts = upgrade_scripts(&["10-ten.sql", "2-two.sql", "1-one.sql", "3-three.sql", "4-four.sql",
        "5-five.sql", "6-six.sql", "7-seven.sql", "8-eight.sql", "9-nine.sql"])
    .unwrap();
    let names: Vec<&str> = scripts.iter().map(DeltaScript::name).collect();
    assert_eq!(names[..3], ["1-one.sql", "2-two.sql", "3-three.sql"]);
    assert_eq!(names[9], "10-ten.sql");
    assert_eq!(scripts[0].contents(), "-- 1-one.sql");
}

#[test]
fn test_gap_in_sequence_fails() {
    let err = upgrade_scripts(&["1-a.sql", "2-b.sql", "4-d.sql"]).unwrap_err();
    assert!(matches!(err, CoreError::InvalidScriptSequence { .. }), "got {err}");
}

#[test]
fn test_duplicate_sequence_fails() {
    let err = upgrade_scripts(&["1-a.sql", "1-b.sql", "2-c.sql"]).unwrap_err();
    assert!(matches!(err, CoreError::InvalidScriptSequence { .. }), "got {err}");
}

#[test]
fn test_sequence_must_start_at_one() {
    let err = upgrade_scripts(&["2-b.sql", "3-c.sql"]).unwrap_err();
    assert!(err.to_string().contains("expected to be 1"), "got {err}");
}

#[test]
fn test_unnumbered_file_fails() {
    let err = upgrade_scripts(&["1-a.sql", "cleanup.sql"]).unwrap_err();
    assert!(matches!(err, CoreError::InvalidScriptSequence { .. }), "got {err}");

    let err = upgrade_scripts(&["0-zero.sql", "1-a.sql"]).unwrap_err();
    assert!(matches!(err, CoreError::InvalidScriptSequence { .. }), "got {err}");
}

#[test]
fn test_other_extensions_are_ignored() {
    let scripts = upgrade_scripts(&["1-a.sql", "2-b.sql", "3-notes.txt"]).unwrap();
    assert_eq!(scripts.len(), 2);
}

#[test]
fn test_missing_category_directory_is_empty() {
    let source = MemoryContentSource::new().with_file(format!("{VERSION_DIR}/rollback/1-a.sql"), "drop table a;");
    let scripts = scripts_with(source, DeltaScriptDirectorySettings::default(), ScriptCategory::Upgrade).unwrap();
    assert!(scripts.is_empty());
}

#[test]
fn test_category_path_that_is_a_file_fails() {
    let source = MemoryContentSource::new().with_file(format!("{VERSION_DIR}/upgrade"), "oops");
    let err = scripts_with(source, DeltaScriptDirectorySettings::default(), ScriptCategory::Upgrade).unwrap_err();
    assert_eq!(err.code(), 1000);
}

#[test]
fn test_empty_directory_when_scripts_are_required() {
    let settings = DeltaScriptDirectorySettings {
        rollback_scripts_must_exist: true,
        ..Default::default()
    };
    let source = MemoryContentSource::new()
        .with_dir(format!("{VERSION_DIR}/rollback"))
        .with_dir(format!("{VERSION_DIR}/bidirectional"));

    let err = scripts_with(source.clone(), settings.clone(), ScriptCategory::Rollback).unwrap_err();
    assert!(matches!(err, CoreError::NoScriptsFound { .. }), "got {err}");

    let bidirectional = scripts_with(source.clone(), settings, ScriptCategory::Bidirectional).unwrap();
    assert!(bidirectional.is_empty());

    let optional = scripts_with(source, DeltaScriptDirectorySettings::default(), ScriptCategory::Rollback).unwrap();
    assert!(optional.is_empty());
}

#[test]
fn test_custom_directory_names_and_extension() {
    let settings = DeltaScriptDirectorySettings {
        extension: ".ddl".to_string(),
        bidirectional_directory_name: "both".to_string(),
        ..Default::default()
    };
    let source = MemoryContentSource::new()
        .with_file(format!("{VERSION_DIR}/both/1-grants.ddl"), "grant select on a to app;")
        .with_file(format!("{VERSION_DIR}/both/2-views.sql"), "ignored");
    let scripts = scripts_with(source, settings, ScriptCategory::Bidirectional).unwrap();
    assert_eq!(scripts.len(), 1);
    assert_eq!(scripts[0].name(), "1-grants.ddl");
}

#[test]
fn test_file_builder_sequence_numbers() {
    assert_eq!(DeltaScriptFileBuilder::sequence_number("1-create.sql"), Some(1));
    assert_eq!(DeltaScriptFileBuilder::sequence_number("042-x.sql"), Some(42));
    assert_eq!(DeltaScriptFileBuilder::sequence_number("0-x.sql"), None);
    assert_eq!(DeltaScriptFileBuilder::sequence_number("1-"), None);
    assert_eq!(DeltaScriptFileBuilder::sequence_number("a-1.sql"), None);
    assert_eq!(DeltaScriptFileBuilder::sequence_number("99999999999-x.sql"), None);
}
