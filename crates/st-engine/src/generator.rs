//! Batch generation: configuration in, migration scripts out

use crate::composer::{ComposedScript, MigrationScriptComposer};
use crate::delta_service::DeltaScriptDirectoryService;
use crate::error::EngineResult;
use crate::module_service::{DirectoryModuleService, ModuleService, NoModuleService};
use crate::run_context::RunContext;
use crate::version_service::DirectoryVersionService;
use crate::writer::{FileWriterFactory, MigrationScriptWriterFactory};
use st_core::{
    ContentSource, CoreError, CoreResult, FsContentSource, GeneralSettings, MigrationScriptSettings,
    Module, StitchConfig,
};
use st_template::{
    BuiltinTemplateLocator, DirectoryTemplateLocator, PeckingOrderTemplateLocator, TemplateLocator,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// What to generate and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Database engine, a key under `database/engine`
    pub engine: String,
    /// Version scheme, a key under `version-schemes`
    pub version_scheme: String,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Empty means the input directory has no module layer
    pub modules: Vec<String>,
    /// `None` means the latest version
    pub version: Option<String>,
}

impl GenerationRequest {
    /// Split a comma-separated module list, dropping blank entries
    pub fn parse_module_list(csv: &str) -> Vec<String> {
        csv.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn uses_modules(&self) -> bool {
        !self.modules.is_empty()
    }
}

/// Builds the services of one run from a configuration
pub struct ServiceBuilder<'a> {
    config: &'a StitchConfig,
    general: GeneralSettings,
    source: Arc<dyn ContentSource>,
}

impl<'a> ServiceBuilder<'a> {
    pub fn new(config: &'a StitchConfig, source: Arc<dyn ContentSource>) -> CoreResult<Self> {
        Ok(Self {
            general: config.general()?,
            config,
            source,
        })
    }

    pub fn general(&self) -> &GeneralSettings {
        &self.general
    }

    /// Child directories are modules when `use_modules`, otherwise `input_dir`
    /// is the single default module
    pub fn module_service(
        &self,
        input_dir: &Path,
        use_modules: bool,
    ) -> CoreResult<Box<dyn ModuleService>> {
        let source = Arc::clone(&self.source);
        Ok(if use_modules {
            Box::new(DirectoryModuleService::new(source, input_dir)?)
        } else {
            Box::new(NoModuleService::new(source, input_dir)?)
        })
    }

    pub fn version_service(&self, scheme: &str) -> CoreResult<DirectoryVersionService> {
        let deserializer = self.config.version_scheme(scheme)?.version_deserializer()?;
        Ok(DirectoryVersionService::new(
            Arc::clone(&self.source),
            deserializer,
            self.general.version_service_settings(),
        ))
    }

    pub fn delta_service(&self) -> DeltaScriptDirectoryService {
        DeltaScriptDirectoryService::new(
            Arc::clone(&self.source),
            self.general.delta_directory_settings(),
        )
    }

    pub fn migration_settings(&self, engine: &str) -> CoreResult<MigrationScriptSettings> {
        let engine = self.config.engine(engine)?;
        Ok(self.general.migration_script_settings(&engine))
    }

    /// Override directory first when configured and present, then built-in
    pub fn template_locator(&self) -> EngineResult<Box<dyn TemplateLocator>> {
        match &self.general.template_override_directory {
            Some(dir) if dir.is_dir() => {
                log::debug!("Using template overrides from {}", dir.display());
                Ok(Box::new(PeckingOrderTemplateLocator::new(vec![
                    Box::new(DirectoryTemplateLocator::new(dir)?),
                    Box::new(BuiltinTemplateLocator),
                ])))
            }
            Some(dir) => {
                log::warn!(
                    "Template override directory {} does not exist, using built-in templates",
                    dir.display()
                );
                Ok(Box::new(BuiltinTemplateLocator))
            }
            None => Ok(Box::new(BuiltinTemplateLocator)),
        }
    }

    pub fn composer(
        &self,
        request: &GenerationRequest,
        writer_factory: Box<dyn MigrationScriptWriterFactory>,
        run: RunContext,
    ) -> EngineResult<MigrationScriptComposer> {
        Ok(MigrationScriptComposer::new(
            self.module_service(&request.input_dir, request.uses_modules())?,
            self.version_service(&request.version_scheme)?,
            self.delta_service(),
            writer_factory,
            self.migration_settings(&request.engine)?,
            run,
        ))
    }
}

/// Generate migration scripts on the local filesystem
pub fn generate(
    config: &StitchConfig,
    request: &GenerationRequest,
    run: RunContext,
) -> EngineResult<Vec<ComposedScript>> {
    let builder = ServiceBuilder::new(config, Arc::new(FsContentSource))?;
    let factory = FileWriterFactory::new(&request.output_dir, builder.template_locator()?)?;
    generate_with(&builder, request, run, Box::new(factory))
}

/// Generate with caller-supplied services and writer factory.
///
/// Without a version the latest version is composed; without modules the
/// input directory is treated as the default module.
pub fn generate_with(
    builder: &ServiceBuilder<'_>,
    request: &GenerationRequest,
    run: RunContext,
    writer_factory: Box<dyn MigrationScriptWriterFactory>,
) -> EngineResult<Vec<ComposedScript>> {
    let composer = builder.composer(request, writer_factory, run)?;
    let engine = request.engine.as_str();

    match (&request.version, request.uses_modules()) {
        (None, false) => composer.compose_for_latest_version(engine),
        (None, true) => {
            let mut composed = Vec::new();
            for name in &request.modules {
                let module = find_module(&composer, name)?;
                composed.extend(composer.compose_for_latest_version_in_module(engine, &module)?);
            }
            Ok(composed)
        }
        (Some(version), false) => {
            let module = find_module(&composer, "")?;
            compose_version(&composer, engine, &module, version)
        }
        (Some(version), true) => {
            let mut composed = Vec::new();
            for name in &request.modules {
                let module = find_module(&composer, name)?;
                composed.extend(compose_version(&composer, engine, &module, version)?);
            }
            Ok(composed)
        }
    }
}

fn find_module(composer: &MigrationScriptComposer, name: &str) -> CoreResult<Module> {
    composer
        .module_service()
        .find_module_by_name(name)?
        .ok_or_else(|| CoreError::InvalidModule {
            message: format!("No such module: {name}"),
        })
}

fn compose_version(
    composer: &MigrationScriptComposer,
    engine: &str,
    module: &Module,
    version: &str,
) -> EngineResult<Vec<ComposedScript>> {
    let versioned = composer
        .version_service()
        .get_version(module, version)?
        .ok_or_else(|| CoreError::invalid_version(format!("No such version: {version}")))?;
    composer.compose_for_module_version(engine, module, &versioned)
}
