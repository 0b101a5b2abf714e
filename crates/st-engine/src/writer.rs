//! Migration script writers
//!
//! The composer drives a [`MigrationScriptWriter`] through one output file:
//! `setup` once, then a group of regular scripts and a group of
//! bidirectional scripts in the order the placement policy asks for, then
//! `finish`.

use crate::error::EngineResult;
use crate::version_service::VersionedDirectory;
use st_core::{CoreError, Module, ScriptCategory};
use st_template::{ScriptContext, ScriptRenderer, TemplateLocator, TemplateSet, WriterContext};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Extension of generated migration scripts
pub const OUTPUT_EXTENSION: &str = "sql";

/// Sink for one composed migration script
pub trait MigrationScriptWriter {
    /// Called once before any script is written
    fn setup(&mut self, context: WriterContext) -> EngineResult<()>;

    fn begin_regular(&mut self) -> EngineResult<()> {
        Ok(())
    }

    fn write_regular(&mut self, script: &ScriptContext) -> EngineResult<()>;

    fn finish_regular(&mut self) -> EngineResult<()> {
        Ok(())
    }

    fn begin_bidirectional(&mut self) -> EngineResult<()> {
        Ok(())
    }

    fn write_bidirectional(&mut self, script: &ScriptContext) -> EngineResult<()>;

    fn finish_bidirectional(&mut self) -> EngineResult<()> {
        Ok(())
    }

    /// Flush and close the output
    fn finish(&mut self) -> EngineResult<()>;
}

/// Creates one writer per (module, version, category) output
pub trait MigrationScriptWriterFactory {
    fn create_writer(
        &self,
        engine: &str,
        module: &Module,
        version: &VersionedDirectory,
        category: ScriptCategory,
    ) -> EngineResult<Box<dyn MigrationScriptWriter>>;
}

/// Renders templates into any [`Write`]
pub struct TemplateScriptWriter<W: Write> {
    out: W,
    target: String,
    renderer: ScriptRenderer,
    templates: TemplateSet,
    context: Option<WriterContext>,
}

impl<W: Write> TemplateScriptWriter<W> {
    /// `target` names the output in error messages
    pub fn new(out: W, target: impl Into<String>, templates: TemplateSet) -> Self {
        Self {
            out,
            target: target.into(),
            renderer: ScriptRenderer::new(),
            templates,
            context: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn context(&self) -> EngineResult<&WriterContext> {
        self.context.as_ref().ok_or_else(|| {
            CoreError::ResourceError {
                message: format!("Writer for {} used before setup", self.target),
            }
            .into()
        })
    }

    fn emit(&mut self, text: &str) -> EngineResult<()> {
        self.out
            .write_all(text.as_bytes())
            .map_err(|e| self.io_error(e))?;
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> CoreError {
        CoreError::IoWithPath {
            path: self.target.clone(),
            source,
        }
    }
}

impl<W: Write> MigrationScriptWriter for TemplateScriptWriter<W> {
    fn setup(&mut self, context: WriterContext) -> EngineResult<()> {
        let header = self.renderer.render_file(&self.templates.file, &context)?;
        self.context = Some(context);
        self.emit(&header)
    }

    fn write_regular(&mut self, script: &ScriptContext) -> EngineResult<()> {
        let text = self
            .renderer
            .render_script(&self.templates.regular, self.context()?, script)?;
        self.emit(&text)
    }

    fn write_bidirectional(&mut self, script: &ScriptContext) -> EngineResult<()> {
        let text =
            self.renderer
                .render_script(&self.templates.bidirectional, self.context()?, script)?;
        self.emit(&text)
    }

    fn finish(&mut self) -> EngineResult<()> {
        self.out.flush().map_err(|e| self.io_error(e))?;
        Ok(())
    }
}

/// Writes `<base>/<module>/<version>/<category>.sql`; the default module
/// gets no module directory
pub struct FileWriterFactory {
    base: PathBuf,
    locator: Box<dyn TemplateLocator>,
}

impl FileWriterFactory {
    /// Fails unless `base` is a directory or can be created in an existing parent
    pub fn new(base: impl Into<PathBuf>, locator: Box<dyn TemplateLocator>) -> EngineResult<Self> {
        let base = base.into();
        let usable = base.is_dir()
            || (!base.exists() && base.parent().is_some_and(|p| p.as_os_str().is_empty() || p.is_dir()));
        if !usable {
            return Err(CoreError::missing_resource(format!(
                "Output directory is not usable: {}",
                base.display()
            ))
            .into());
        }
        Ok(Self { base, locator })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Path of the output file for one composition
    pub fn output_path(
        &self,
        module: &Module,
        version: &VersionedDirectory,
        category: ScriptCategory,
    ) -> PathBuf {
        let mut dir = self.base.clone();
        if !module.is_default() {
            dir.push(module.name());
        }
        dir.push(version.name());
        dir.join(format!("{}.{OUTPUT_EXTENSION}", category.label()))
    }
}

impl MigrationScriptWriterFactory for FileWriterFactory {
    fn create_writer(
        &self,
        engine: &str,
        module: &Module,
        version: &VersionedDirectory,
        category: ScriptCategory,
    ) -> EngineResult<Box<dyn MigrationScriptWriter>> {
        let templates = TemplateSet::resolve(self.locator.as_ref(), engine, category)?;
        let path = self.output_path(module, version, category);
        let target = path.display().to_string();
        let io_error = |source| CoreError::IoWithPath {
            path: target.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let file = File::create(&path).map_err(io_error)?;
        log::info!("Writing {target}");

        Ok(Box::new(TemplateScriptWriter::new(
            BufWriter::new(file),
            target,
            templates,
        )))
    }
}

#[cfg(test)]
#[path = "writer_test.rs"]
mod tests;
