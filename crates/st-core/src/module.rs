//! Modules: named groups of versions backed by a directory

use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

/// Name of the implicit module used when the input has no module layer
pub const DEFAULT_MODULE_NAME: &str = "default";

/// A module and the directory holding its version directories.
///
/// Ordered by name, then directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Module {
    name: String,
    directory: PathBuf,
}

impl Module {
    pub fn new(name: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
        }
    }

    /// The `default` module rooted at `directory`
    pub fn default_module(directory: impl Into<PathBuf>) -> Self {
        Self::new(DEFAULT_MODULE_NAME, directory)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// True for the implicit no-module case; its output has no module directory
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_MODULE_NAME
    }
}

impl PartialOrd for Module {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Module {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.directory.cmp(&other.directory))
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modules_sort_by_name() {
        let mut modules = vec![
            Module::new("sales", "/in/sales"),
            Module::new("billing", "/in/billing"),
            Module::new("core", "/in/core"),
        ];
        modules.sort();
        let names: Vec<&str> = modules.iter().map(Module::name).collect();
        assert_eq!(names, ["billing", "core", "sales"]);
    }

    #[test]
    fn test_default_module() {
        let module = Module::default_module("/in");
        assert!(module.is_default());
        assert_eq!(module.name(), DEFAULT_MODULE_NAME);
        assert_eq!(module.directory(), Path::new("/in"));
        assert!(!Module::new("core", "/in/core").is_default());
    }
}
