//! Template lookup
//!
//! Every engine has three templates, one per [`ScriptCategory`], stored as
//! `<engine>/<category>_template.txt`. The output file template is shared by
//! all engines and stored as `file_template.txt`.

use crate::error::{TemplateError, TemplateResult};
use st_core::ScriptCategory;
use std::path::{Path, PathBuf};

/// Name of the template that opens every output file
pub const FILE_TEMPLATE_NAME: &str = "file_template.txt";

/// Relative path of the per-script template for `engine` and `category`
pub fn script_template_path(engine: &str, category: ScriptCategory) -> String {
    format!("{engine}/{}_template.txt", category.label())
}

/// Finds templates by name; `Ok(None)` when this locator does not have one
pub trait TemplateLocator: Send + Sync {
    /// Per-script template for a database engine and category
    fn find_script_template(
        &self,
        engine: &str,
        category: ScriptCategory,
    ) -> TemplateResult<Option<String>>;

    /// Output file template
    fn find_file_template(&self) -> TemplateResult<Option<String>>;
}

/// Templates compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplateLocator;

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (FILE_TEMPLATE_NAME, include_str!("../templates/file_template.txt")),
    ("mssql/upgrade_template.txt", include_str!("../templates/mssql/upgrade_template.txt")),
    ("mssql/rollback_template.txt", include_str!("../templates/mssql/rollback_template.txt")),
    (
        "mssql/bidirectional_template.txt",
        include_str!("../templates/mssql/bidirectional_template.txt"),
    ),
    ("mysql/upgrade_template.txt", include_str!("../templates/mysql/upgrade_template.txt")),
    ("mysql/rollback_template.txt", include_str!("../templates/mysql/rollback_template.txt")),
    (
        "mysql/bidirectional_template.txt",
        include_str!("../templates/mysql/bidirectional_template.txt"),
    ),
    (
        "postgresql/upgrade_template.txt",
        include_str!("../templates/postgresql/upgrade_template.txt"),
    ),
    (
        "postgresql/rollback_template.txt",
        include_str!("../templates/postgresql/rollback_template.txt"),
    ),
    (
        "postgresql/bidirectional_template.txt",
        include_str!("../templates/postgresql/bidirectional_template.txt"),
    ),
];

impl BuiltinTemplateLocator {
    fn lookup(name: &str) -> Option<String> {
        BUILTIN_TEMPLATES
            .iter()
            .find(|(path, _)| *path == name)
            .map(|(_, contents)| (*contents).to_string())
    }

    /// Engines with built-in templates
    pub fn engines() -> Vec<&'static str> {
        let mut engines: Vec<&'static str> = BUILTIN_TEMPLATES
            .iter()
            .filter_map(|(path, _)| path.split_once('/').map(|(engine, _)| engine))
            .collect();
        engines.dedup();
        engines
    }
}

impl TemplateLocator for BuiltinTemplateLocator {
    fn find_script_template(
        &self,
        engine: &str,
        category: ScriptCategory,
    ) -> TemplateResult<Option<String>> {
        Ok(Self::lookup(&script_template_path(engine, category)))
    }

    fn find_file_template(&self) -> TemplateResult<Option<String>> {
        Ok(Self::lookup(FILE_TEMPLATE_NAME))
    }
}

/// Templates read from a directory laid out like the built-in set
#[derive(Debug, Clone)]
pub struct DirectoryTemplateLocator {
    directory: PathBuf,
}

impl DirectoryTemplateLocator {
    /// Fails if `directory` is not an existing directory
    pub fn new(directory: impl Into<PathBuf>) -> TemplateResult<Self> {
        let directory = directory.into();
        if !directory.is_dir() {
            return Err(TemplateError::InvalidDirectory {
                path: directory.display().to_string(),
            });
        }
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn read(&self, relative: &str) -> TemplateResult<Option<String>> {
        let path = self.directory.join(relative);
        if !path.is_file() {
            return Ok(None);
        }
        log::debug!("Using template override {}", path.display());
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| TemplateError::Io {
                path: path.display().to_string(),
                source: e,
            })
    }
}

impl TemplateLocator for DirectoryTemplateLocator {
    fn find_script_template(
        &self,
        engine: &str,
        category: ScriptCategory,
    ) -> TemplateResult<Option<String>> {
        self.read(&script_template_path(engine, category))
    }

    fn find_file_template(&self) -> TemplateResult<Option<String>> {
        self.read(FILE_TEMPLATE_NAME)
    }
}

/// Asks each locator in turn; the first to find a template wins
pub struct PeckingOrderTemplateLocator {
    locators: Vec<Box<dyn TemplateLocator>>,
}

impl PeckingOrderTemplateLocator {
    pub fn new(locators: Vec<Box<dyn TemplateLocator>>) -> Self {
        Self { locators }
    }
}

impl TemplateLocator for PeckingOrderTemplateLocator {
    fn find_script_template(
        &self,
        engine: &str,
        category: ScriptCategory,
    ) -> TemplateResult<Option<String>> {
        for locator in &self.locators {
            if let Some(template) = locator.find_script_template(engine, category)? {
                return Ok(Some(template));
            }
        }
        Ok(None)
    }

    fn find_file_template(&self) -> TemplateResult<Option<String>> {
        for locator in &self.locators {
            if let Some(template) = locator.find_file_template()? {
                return Ok(Some(template));
            }
        }
        Ok(None)
    }
}

/// The three templates needed to write one output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    pub file: String,
    pub regular: String,
    pub bidirectional: String,
}

impl TemplateSet {
    /// Resolve the templates for an output of `category`, failing on any gap
    pub fn resolve(
        locator: &dyn TemplateLocator,
        engine: &str,
        category: ScriptCategory,
    ) -> TemplateResult<Self> {
        let file = locator
            .find_file_template()?
            .ok_or_else(|| TemplateError::MissingTemplate {
                name: FILE_TEMPLATE_NAME.to_string(),
            })?;
        let regular = Self::script(locator, engine, category)?;
        let bidirectional = Self::script(locator, engine, ScriptCategory::Bidirectional)?;
        Ok(Self {
            file,
            regular,
            bidirectional,
        })
    }

    fn script(
        locator: &dyn TemplateLocator,
        engine: &str,
        category: ScriptCategory,
    ) -> TemplateResult<String> {
        locator
            .find_script_template(engine, category)?
            .ok_or_else(|| TemplateError::MissingTemplate {
                name: script_template_path(engine, category),
            })
    }
}

#[cfg(test)]
#[path = "locator_test.rs"]
mod tests;
