//! st-engine - Migration script composition for stitch
//!
//! Reads modules, versions and numbered delta scripts from an input tree,
//! validates them and writes one upgrade and one rollback script per
//! module version through template-driven writers.

pub mod composer;
pub mod delta_service;
pub mod error;
pub mod generator;
pub mod module_service;
pub mod run_context;
pub mod version_service;
pub mod writer;

pub use composer::{ComposedScript, MigrationScriptComposer};
pub use delta_service::{DeltaScriptDirectoryService, DeltaScriptFileBuilder};
pub use error::{EngineError, EngineResult};
pub use generator::{generate, generate_with, GenerationRequest, ServiceBuilder};
pub use module_service::{DirectoryModuleService, ModuleService, NoModuleService};
pub use run_context::RunContext;
pub use version_service::{DirectoryVersionService, VersionedDirectory};
pub use writer::{
    FileWriterFactory, MigrationScriptWriter, MigrationScriptWriterFactory, TemplateScriptWriter,
};
