//! Directory content sources
//!
//! The module, version and delta script services only see the input tree
//! through [`ContentSource`], so tests can run against an in-memory tree.

use crate::error::{CoreError, CoreResult};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Read-only view of a directory tree
pub trait ContentSource: Send + Sync {
    /// True if `path` exists and is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// True if `path` exists and is a regular file
    fn is_file(&self, path: &Path) -> bool;

    /// True if anything exists at `path`
    fn exists(&self, path: &Path) -> bool {
        self.is_dir(path) || self.is_file(path)
    }

    /// Immediate child directories of `dir`, sorted
    fn list_dirs(&self, dir: &Path) -> CoreResult<Vec<PathBuf>>;

    /// Immediate child files of `dir` whose names end with `extension`, sorted
    fn list_files(&self, dir: &Path, extension: &str) -> CoreResult<Vec<PathBuf>>;

    /// Full text of the file at `path`
    fn read_to_string(&self, path: &Path) -> CoreResult<String>;
}

/// [`ContentSource`] over the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsContentSource;

impl FsContentSource {
    fn children(dir: &Path) -> CoreResult<Vec<std::fs::DirEntry>> {
        let entries = std::fs::read_dir(dir).map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })?;
        entries
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CoreError::IoWithPath {
                path: dir.display().to_string(),
                source: e,
            })
    }
}

impl ContentSource for FsContentSource {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn list_dirs(&self, dir: &Path) -> CoreResult<Vec<PathBuf>> {
        let mut dirs: Vec<PathBuf> = Self::children(dir)?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();
        Ok(dirs)
    }

    fn list_files(&self, dir: &Path, extension: &str) -> CoreResult<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = Self::children(dir)?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_suffix(path, extension))
            .collect();
        files.sort();
        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> CoreResult<String> {
        std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })
    }
}

/// In-memory [`ContentSource`]; adding a file creates its parent directories
#[derive(Debug, Clone, Default)]
pub struct MemoryContentSource {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
}

impl MemoryContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty directory and its ancestors
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path.as_ref());
        self
    }

    /// Add a file with `contents`
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path.to_path_buf(), contents.into());
        self
    }

    fn add_dir(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    fn require_dir(&self, dir: &Path) -> CoreResult<()> {
        if self.dirs.contains(dir) {
            Ok(())
        } else {
            Err(CoreError::IoWithPath {
                path: dir.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            })
        }
    }
}

impl ContentSource for MemoryContentSource {
    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn list_dirs(&self, dir: &Path) -> CoreResult<Vec<PathBuf>> {
        self.require_dir(dir)?;
        Ok(self
            .dirs
            .iter()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect())
    }

    fn list_files(&self, dir: &Path, extension: &str) -> CoreResult<Vec<PathBuf>> {
        self.require_dir(dir)?;
        Ok(self
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir) && has_suffix(p, extension))
            .cloned()
            .collect())
    }

    fn read_to_string(&self, path: &Path) -> CoreResult<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| CoreError::IoWithPath {
                path: path.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            })
    }
}

/// File-name suffix match; `.sql` matches `1-a.sql` but not `1-a.sqlx`
fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(suffix))
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
