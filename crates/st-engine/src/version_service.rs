//! Version discovery inside a module directory

use st_core::{
    ContentSource, CoreError, CoreResult, Module, Version, VersionDeserializer,
    VersionServiceSettings,
};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A version directory whose name is exactly its version's canonical name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedDirectory {
    directory: PathBuf,
    version: Version,
}

impl VersionedDirectory {
    pub fn new(
        source: &dyn ContentSource,
        directory: impl Into<PathBuf>,
        version: Version,
    ) -> CoreResult<Self> {
        let directory = directory.into();
        if !source.is_dir(&directory) {
            return Err(CoreError::version_directory(format!(
                "Version directory not found at '{}'",
                directory.display()
            )));
        }
        let dir_name = directory
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        if dir_name != version.name() {
            return Err(CoreError::version_directory(format!(
                "Directory name ({dir_name}) must match version name ({})",
                version.name()
            )));
        }
        Ok(Self { directory, version })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Directory name, equal to the version's canonical name
    pub fn name(&self) -> &str {
        self.version.name()
    }

    /// See [`Version::compare_to`]
    pub fn compare_to(&self, other: &VersionedDirectory) -> Ordering {
        self.version.compare_to(Some(&other.version))
    }
}

/// Finds versions by parsing the names of a module's child directories
pub struct DirectoryVersionService {
    source: Arc<dyn ContentSource>,
    deserializer: Box<dyn VersionDeserializer>,
    settings: VersionServiceSettings,
}

impl DirectoryVersionService {
    pub fn new(
        source: Arc<dyn ContentSource>,
        deserializer: Box<dyn VersionDeserializer>,
        settings: VersionServiceSettings,
    ) -> Self {
        Self {
            source,
            deserializer,
            settings,
        }
    }

    /// The version whose directory is named exactly `version_string`
    pub fn get_version(
        &self,
        module: &Module,
        version_string: &str,
    ) -> CoreResult<Option<VersionedDirectory>> {
        log::debug!("Finding the '{version_string}' version in {} ...", module.name());
        let found = self
            .source
            .list_dirs(module.directory())?
            .into_iter()
            .find(|dir| dir.file_name().and_then(|n| n.to_str()) == Some(version_string));
        match found {
            Some(dir) => self.versioned_directory(dir),
            None => Ok(None),
        }
    }

    /// Every version of `module`, ascending.
    ///
    /// A child directory that is not a version fails the call unless
    /// invalid versions are ignored.
    pub fn list_versions(&self, module: &Module) -> CoreResult<Vec<VersionedDirectory>> {
        let mut versions = Vec::new();
        for dir in self.source.list_dirs(module.directory())? {
            log::debug!("Processing {} ...", dir.display());
            match self.versioned_directory(dir.clone())? {
                Some(version) => versions.push(version),
                None if self.settings.ignore_invalid_versions => {
                    log::debug!("Ignoring non-conformant version directory {}", dir.display());
                }
                None => {
                    return Err(CoreError::version_directory(format!(
                        "Non-conformant version directory found at: {}",
                        dir.display()
                    )));
                }
            }
        }
        versions.sort_by(|a, b| a.compare_to(b));
        Ok(versions)
    }

    /// Highest version of `module`, if it has any
    pub fn latest_version(&self, module: &Module) -> CoreResult<Option<VersionedDirectory>> {
        log::debug!("Finding the latest version in {} ...", module.name());
        Ok(self.list_versions(module)?.pop())
    }

    fn versioned_directory(&self, dir: PathBuf) -> CoreResult<Option<VersionedDirectory>> {
        let name = dir.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let Some(version) = self.deserializer.deserialize(name)? else {
            log::debug!("Could not deserialize '{name}' into a version");
            return Ok(None);
        };
        VersionedDirectory::new(self.source.as_ref(), dir, version).map(Some)
    }
}

#[cfg(test)]
#[path = "version_service_test.rs"]
mod tests;
