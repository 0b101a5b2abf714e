//! Module discovery over an input directory

use st_core::{ContentSource, CoreError, CoreResult, Module};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Resolves modules by name and lists them
pub trait ModuleService {
    /// `Ok(None)` when no module of that name exists
    fn find_module_by_name(&self, name: &str) -> CoreResult<Option<Module>>;

    /// Every module, sorted by name
    fn list_all_modules(&self) -> CoreResult<Vec<Module>>;
}

fn require_base_directory(source: &dyn ContentSource, base: &Path) -> CoreResult<()> {
    if source.is_dir(base) {
        Ok(())
    } else {
        Err(CoreError::ModuleDirectoryError {
            message: format!(
                "No base directory exists for locating modules: {}",
                base.display()
            ),
        })
    }
}

/// Every child directory of the input directory is a module
pub struct DirectoryModuleService {
    source: Arc<dyn ContentSource>,
    base_directory: PathBuf,
}

impl DirectoryModuleService {
    pub fn new(source: Arc<dyn ContentSource>, base_directory: impl Into<PathBuf>) -> CoreResult<Self> {
        let base_directory = base_directory.into();
        require_base_directory(source.as_ref(), &base_directory)?;
        Ok(Self {
            source,
            base_directory,
        })
    }
}

impl ModuleService for DirectoryModuleService {
    fn find_module_by_name(&self, name: &str) -> CoreResult<Option<Module>> {
        let path = self.base_directory.join(name);
        if !self.source.exists(&path) {
            return Ok(None);
        }
        if !self.source.is_dir(&path) {
            return Err(CoreError::ModuleDirectoryError {
                message: format!("The given module '{name}' is not a directory"),
            });
        }
        Ok(Some(Module::new(name, path)))
    }

    fn list_all_modules(&self) -> CoreResult<Vec<Module>> {
        let mut modules: Vec<Module> = self
            .source
            .list_dirs(&self.base_directory)?
            .into_iter()
            .filter_map(|dir| {
                let name = dir.file_name()?.to_str()?.to_string();
                Some(Module::new(name, dir))
            })
            .collect();
        modules.sort();
        Ok(modules)
    }
}

/// The input directory is the single `default` module
pub struct NoModuleService {
    base_directory: PathBuf,
}

impl NoModuleService {
    pub fn new(source: Arc<dyn ContentSource>, base_directory: impl Into<PathBuf>) -> CoreResult<Self> {
        let base_directory = base_directory.into();
        require_base_directory(source.as_ref(), &base_directory)?;
        Ok(Self { base_directory })
    }
}

impl ModuleService for NoModuleService {
    /// Only the empty name resolves
    fn find_module_by_name(&self, name: &str) -> CoreResult<Option<Module>> {
        if name.is_empty() {
            Ok(Some(Module::default_module(&self.base_directory)))
        } else {
            Ok(None)
        }
    }

    fn list_all_modules(&self) -> CoreResult<Vec<Module>> {
        Ok(self.find_module_by_name("")?.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use st_core::MemoryContentSource;

    fn source() -> Arc<dyn ContentSource> {
        Arc::new(
            MemoryContentSource::new()
                .with_dir("/in/sales/1.0")
                .with_dir("/in/billing")
                .with_file("/in/README.md", "modules live here"),
        )
    }

    #[test]
    fn test_directory_service_lists_child_directories() {
        let service = DirectoryModuleService::new(source(), "/in").unwrap();
        let modules = service.list_all_modules().unwrap();
        let names: Vec<&str> = modules.iter().map(Module::name).collect();
        assert_eq!(names, ["billing", "sales"]);
        assert_eq!(modules[1].directory(), Path::new("/in/sales"));
    }

    #[test]
    fn test_directory_service_find_by_name() {
        let service = DirectoryModuleService::new(source(), "/in").unwrap();
        let sales = service.find_module_by_name("sales").unwrap().unwrap();
        assert_eq!(sales.directory(), Path::new("/in/sales"));
        assert!(!sales.is_default());
        assert!(service.find_module_by_name("hr").unwrap().is_none());

        let err = service.find_module_by_name("README.md").unwrap_err();
        assert_eq!(err.code(), 4001);
    }

    #[test]
    fn test_missing_base_directory_is_an_error() {
        assert_eq!(DirectoryModuleService::new(source(), "/nope").err().map(|e| e.code()), Some(4001));
        assert_eq!(NoModuleService::new(source(), "/nope").err().map(|e| e.code()), Some(4001));
    }

    #[test]
    fn test_no_module_service_has_only_the_default_module() {
        let service = NoModuleService::new(source(), "/in").unwrap();
        let modules = service.list_all_modules().unwrap();
        assert_eq!(modules, vec![Module::default_module("/in")]);
        assert!(modules[0].is_default());
        assert!(service.find_module_by_name("sales").unwrap().is_none());
    }
}
