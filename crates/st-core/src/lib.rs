//! st-core - Core library for stitch
//!
//! This crate provides the version schemes, delta script and module types,
//! run settings, YAML configuration and the directory content sources used
//! by every other stitch component.

pub mod config;
pub mod delta;
pub mod error;
pub mod module;
pub mod settings;
pub mod source;
pub mod version;

pub use config::{
    EngineSettings, GeneralSettings, Semver1SchemeSettings, StandardSchemeSettings, StitchConfig,
    VersionSchemeSettings, DEFAULT_VERSION_SCHEME,
};
pub use delta::{DeltaScript, ScriptCategory};
pub use error::{CoreError, CoreResult};
pub use module::{Module, DEFAULT_MODULE_NAME};
pub use settings::{
    BidirectionalOrder, DeltaScriptDirectorySettings, MigrationScriptSettings,
    VersionServiceSettings,
};
pub use source::{ContentSource, FsContentSource, MemoryContentSource};
pub use version::{sort_versions, Version, VersionDeserializer};
