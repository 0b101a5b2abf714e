use super::*;
use st_core::version::{FourDigitVersionDeserializer, Semver1VersionDeserializer};
use st_core::{MemoryContentSource, StitchConfig};

fn standard() -> Box<dyn VersionDeserializer> {
    StitchConfig::builtin()
        .unwrap()
        .version_scheme("default-standard")
        .unwrap()
        .version_deserializer()
        .unwrap()
}

fn service(source: MemoryContentSource, ignore_invalid_versions: bool) -> DirectoryVersionService {
    DirectoryVersionService::new(
        Arc::new(source),
        standard(),
        VersionServiceSettings {
            ignore_invalid_versions,
        },
    )
}

fn module() -> Module {
    Module::new("core", "/in/core")
}

#[test]
fn test_latest_version_uses_version_ordering() {
    let source = MemoryContentSource::new()
        .with_dir("/in/core/1.0")
        .with_dir("/in/core/1.10")
        .with_dir("/in/core/1.9.1")
        .with_dir("/in/core/1.10-rc-1")
        .with_dir("/in/core/1.2");

    let service = service(source, false);
    let latest = service.latest_version(&module()).unwrap().unwrap();
    assert_eq!(latest.name(), "1.10");
    assert_eq!(latest.directory(), Path::new("/in/core/1.10"));

    let names: Vec<String> = service
        .list_versions(&module())
        .unwrap()
        .iter()
        .map(|v| v.name().to_string())
        .collect();
    assert_eq!(names, ["1.0", "1.2", "1.9.1", "1.10-rc-1", "1.10"]);
}

#[test]
fn test_prerelease_is_latest_when_no_release_exists() {
    let source = MemoryContentSource::new()
        .with_dir("/in/core/2.0-alpha-1")
        .with_dir("/in/core/2.0-beta-1")
        .with_dir("/in/core/1.9");
    let latest = service(source, false).latest_version(&module()).unwrap().unwrap();
    assert_eq!(latest.name(), "2.0-beta-1");
}

#[test]
fn test_module_without_versions() {
    let source = MemoryContentSource::new().with_dir("/in/core");
    assert!(service(source, false).latest_version(&module()).unwrap().is_none());
}

#[test]
fn test_invalid_version_directory_fails_unless_ignored() {
    let source = MemoryContentSource::new()
        .with_dir("/in/core/1.0")
        .with_dir("/in/core/drafts");

    let err = service(source.clone(), false).latest_version(&module()).unwrap_err();
    assert!(matches!(err, CoreError::VersionDirectoryError { .. }), "got {err}");

    let latest = service(source, true).latest_version(&module()).unwrap().unwrap();
    assert_eq!(latest.name(), "1.0");
}

#[test]
fn test_leading_zero_directory_is_a_hard_error() {
    let source = MemoryContentSource::new().with_dir("/in/core/01.0");
    let err = service(source, true).latest_version(&module()).unwrap_err();
    assert!(matches!(err, CoreError::InvalidVersion { .. }), "got {err}");
}

#[test]
fn test_directory_name_must_match_version_name() {
    // The four-digit parser ignores trailing text, so the names differ
    let source = MemoryContentSource::new().with_dir("/in/core/1.0.0x");
    let service = DirectoryVersionService::new(
        Arc::new(source),
        Box::new(FourDigitVersionDeserializer::new(".").unwrap()),
        VersionServiceSettings::default(),
    );
    let err = service.latest_version(&module()).unwrap_err();
    assert!(matches!(err, CoreError::VersionDirectoryError { .. }), "got {err}");
}

#[test]
fn test_get_version_matches_exact_directory_name() {
    let source = MemoryContentSource::new()
        .with_dir("/in/core/1.0")
        .with_dir("/in/core/1.1-rc-2");
    let service = service(source, false);

    let version = service.get_version(&module(), "1.1-rc-2").unwrap().unwrap();
    assert_eq!(version.name(), "1.1-rc-2");
    assert!(matches!(version.version(), Version::Tagged(_)));
    assert!(service.get_version(&module(), "1.1").unwrap().is_none());
    assert!(service.get_version(&module(), "2.0").unwrap().is_none());
}

#[test]
fn test_semver1_versions_order_by_timestamp() {
    let source = MemoryContentSource::new()
        .with_dir("/in/core/1.0.0+20240101120000")
        .with_dir("/in/core/1.0.0+20231231235959")
        .with_dir("/in/core/0.9.9+20250101000000");
    let service = DirectoryVersionService::new(
        Arc::new(source),
        Box::new(Semver1VersionDeserializer::new(".", "+", "%Y%m%d%H%M%S").unwrap()),
        VersionServiceSettings::default(),
    );
    let latest = service.latest_version(&module()).unwrap().unwrap();
    assert_eq!(latest.name(), "1.0.0+20240101120000");
}

#[test]
fn test_versioned_directory_requires_existing_directory() {
    let source = MemoryContentSource::new();
    let version = standard().deserialize("1.0").unwrap().unwrap();
    let err = VersionedDirectory::new(&source, "/in/core/1.0", version).unwrap_err();
    assert_eq!(err.code(), 2001);
}
