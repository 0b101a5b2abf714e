//! Migration script composition
//!
//! For one module version the composer reads the upgrade, rollback and
//! bidirectional delta scripts, checks that rollback mirrors upgrade, and
//! writes one upgrade and one rollback script with the bidirectional
//! scripts placed per [`BidirectionalOrder`].

use crate::delta_service::DeltaScriptDirectoryService;
use crate::error::EngineResult;
use crate::module_service::ModuleService;
use crate::run_context::RunContext;
use crate::version_service::{DirectoryVersionService, VersionedDirectory};
use crate::writer::{MigrationScriptWriter, MigrationScriptWriterFactory};
use st_core::{
    BidirectionalOrder, CoreError, DeltaScript, MigrationScriptSettings, Module, ScriptCategory,
};
use st_template::{ScriptContext, WriterContext};

/// Summary of one written migration script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedScript {
    pub module: String,
    pub version: String,
    pub category: ScriptCategory,
    /// Regular plus bidirectional scripts in the output
    pub script_count: usize,
}

/// Ties the directory services to a writer factory
pub struct MigrationScriptComposer {
    module_service: Box<dyn ModuleService>,
    version_service: DirectoryVersionService,
    delta_service: DeltaScriptDirectoryService,
    writer_factory: Box<dyn MigrationScriptWriterFactory>,
    settings: MigrationScriptSettings,
    run: RunContext,
}

impl MigrationScriptComposer {
    pub fn new(
        module_service: Box<dyn ModuleService>,
        version_service: DirectoryVersionService,
        delta_service: DeltaScriptDirectoryService,
        writer_factory: Box<dyn MigrationScriptWriterFactory>,
        settings: MigrationScriptSettings,
        run: RunContext,
    ) -> Self {
        Self {
            module_service,
            version_service,
            delta_service,
            writer_factory,
            settings,
            run,
        }
    }

    pub fn module_service(&self) -> &dyn ModuleService {
        self.module_service.as_ref()
    }

    pub fn version_service(&self) -> &DirectoryVersionService {
        &self.version_service
    }

    /// Latest version of every module; modules without versions are skipped
    pub fn compose_for_latest_version(&self, engine: &str) -> EngineResult<Vec<ComposedScript>> {
        let mut composed = Vec::new();
        for module in self.module_service.list_all_modules()? {
            composed.extend(self.compose_for_latest_version_in_module(engine, &module)?);
        }
        Ok(composed)
    }

    /// Latest version of the named module; nothing is written if it does not exist
    pub fn compose_for_latest_version_in_module_named(
        &self,
        engine: &str,
        module_name: &str,
    ) -> EngineResult<Vec<ComposedScript>> {
        match self.module_service.find_module_by_name(module_name)? {
            Some(module) => self.compose_for_latest_version_in_module(engine, &module),
            None => {
                log::warn!("No module named '{module_name}' found");
                Ok(Vec::new())
            }
        }
    }

    pub fn compose_for_latest_version_in_module(
        &self,
        engine: &str,
        module: &Module,
    ) -> EngineResult<Vec<ComposedScript>> {
        match self.version_service.latest_version(module)? {
            Some(version) => self.compose_for_module_version(engine, module, &version),
            None => {
                log::info!("No versions found in module {}, skipping", module.name());
                Ok(Vec::new())
            }
        }
    }

    /// Write the upgrade and rollback scripts of one module version.
    ///
    /// An output whose regular script list is empty is not written, even
    /// when bidirectional scripts exist.
    pub fn compose_for_module_version(
        &self,
        engine: &str,
        module: &Module,
        version: &VersionedDirectory,
    ) -> EngineResult<Vec<ComposedScript>> {
        log::debug!("Composing {}:{} for {engine}", module.name(), version.name());

        let upgrade = self
            .delta_service
            .get_scripts(ScriptCategory::Upgrade, module, version)?;
        let rollback = self
            .delta_service
            .get_scripts(ScriptCategory::Rollback, module, version)?;
        if !rollback.is_empty() && rollback.len() != upgrade.len() {
            return Err(CoreError::version_directory(format!(
                "Number of rollback scripts ({}) does not match the number of upgrade scripts ({}) in {}:{}",
                rollback.len(),
                upgrade.len(),
                module.name(),
                version.name()
            ))
            .into());
        }
        let bidirectional = self
            .delta_service
            .get_scripts(ScriptCategory::Bidirectional, module, version)?;

        let mut composed = Vec::new();
        for (category, regular) in [
            (ScriptCategory::Upgrade, upgrade.as_slice()),
            (ScriptCategory::Rollback, rollback.as_slice()),
        ] {
            let order = self.settings.order_for(category);
            let included: &[DeltaScript] = if order.includes_bidirectional() {
                &bidirectional
            } else {
                if !bidirectional.is_empty() {
                    log::debug!("Excluding bidirectional scripts from the {category} script");
                }
                &[]
            };
            let output = Output {
                category,
                order,
                regular,
                bidirectional: included,
            };
            if let Some(script) = self.write_output(engine, module, version, output)? {
                composed.push(script);
            }
        }
        Ok(composed)
    }

    fn write_output(
        &self,
        engine: &str,
        module: &Module,
        version: &VersionedDirectory,
        output: Output<'_>,
    ) -> EngineResult<Option<ComposedScript>> {
        let Output {
            category,
            order,
            regular,
            bidirectional,
        } = output;
        if regular.is_empty() {
            log::debug!(
                "No {category} scripts in {}:{}, nothing to write",
                module.name(),
                version.name()
            );
            return Ok(None);
        }

        let script_count = regular.len() + bidirectional.len();
        let context = WriterContext {
            release_label: version.name().to_string(),
            creation_timestamp: self.run.creation_timestamp(),
            script_author: self.run.script_author.clone(),
            module_name: module.name().to_string(),
            file_type: category.label().to_string(),
            script_count,
            change_log_table_name: self.settings.change_log_table_name.clone(),
            statement_separator: self.settings.statement_separator.clone(),
            statement_delimiter: self.settings.statement_delimiter.clone(),
        };

        let mut writer = self
            .writer_factory
            .create_writer(engine, module, version, category)?;
        writer.setup(context)?;
        if order == BidirectionalOrder::First {
            write_bidirectional(writer.as_mut(), bidirectional)?;
            write_regular(writer.as_mut(), regular)?;
        } else {
            write_regular(writer.as_mut(), regular)?;
            write_bidirectional(writer.as_mut(), bidirectional)?;
        }
        writer.finish()?;

        Ok(Some(ComposedScript {
            module: module.name().to_string(),
            version: version.name().to_string(),
            category,
            script_count,
        }))
    }
}

/// Scripts bound for one output file
struct Output<'a> {
    category: ScriptCategory,
    order: BidirectionalOrder,
    regular: &'a [DeltaScript],
    bidirectional: &'a [DeltaScript],
}

fn script_contexts(scripts: &[DeltaScript]) -> impl Iterator<Item = ScriptContext> + '_ {
    scripts.iter().enumerate().map(|(i, script)| ScriptContext {
        script_name: script.name().to_string(),
        script_contents: script.contents().to_string(),
        index: i + 1,
        script_count: scripts.len(),
        script_sequence_number: script.sequence_number(),
    })
}

fn write_regular(writer: &mut dyn MigrationScriptWriter, scripts: &[DeltaScript]) -> EngineResult<()> {
    if scripts.is_empty() {
        return Ok(());
    }
    writer.begin_regular()?;
    for context in script_contexts(scripts) {
        writer.write_regular(&context)?;
    }
    writer.finish_regular()
}

fn write_bidirectional(
    writer: &mut dyn MigrationScriptWriter,
    scripts: &[DeltaScript],
) -> EngineResult<()> {
    if scripts.is_empty() {
        return Ok(());
    }
    writer.begin_bidirectional()?;
    for context in script_contexts(scripts) {
        writer.write_bidirectional(&context)?;
    }
    writer.finish_bidirectional()
}

#[cfg(test)]
#[path = "composer_test.rs"]
mod tests;
