//! Delta script discovery and sequence validation

use crate::version_service::VersionedDirectory;
use regex::Regex;
use st_core::{
    ContentSource, CoreError, CoreResult, DeltaScript, DeltaScriptDirectorySettings, Module,
    ScriptCategory,
};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, OnceLock};

static DELTA_FILE_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn delta_file_name() -> &'static Regex {
    DELTA_FILE_NAME_RE.get_or_init(|| Regex::new(r"^(\d+)-(.+)$").expect("valid regex"))
}

/// Builds [`DeltaScript`]s from files named `<sequence>-<label><ext>`
#[derive(Debug, Clone, Copy, Default)]
pub struct DeltaScriptFileBuilder;

impl DeltaScriptFileBuilder {
    /// Positive sequence number encoded in `file_name`, if any
    pub fn sequence_number(file_name: &str) -> Option<u32> {
        let caps = delta_file_name().captures(file_name)?;
        match caps[1].parse::<u32>() {
            Ok(n) if n > 0 => Some(n),
            _ => {
                log::warn!("Invalid file name format: {file_name}");
                None
            }
        }
    }

    /// `Ok(None)` for files whose names do not carry a sequence number
    pub fn build(&self, source: &dyn ContentSource, path: &Path) -> CoreResult<Option<DeltaScript>> {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return Ok(None);
        };
        let Some(sequence_number) = Self::sequence_number(file_name) else {
            return Ok(None);
        };
        let contents = source.read_to_string(path)?;
        DeltaScript::new(file_name, sequence_number, contents).map(Some)
    }
}

/// Reads the delta scripts of one category from a version directory
pub struct DeltaScriptDirectoryService {
    source: Arc<dyn ContentSource>,
    builder: DeltaScriptFileBuilder,
    settings: DeltaScriptDirectorySettings,
}

impl DeltaScriptDirectoryService {
    pub fn new(source: Arc<dyn ContentSource>, settings: DeltaScriptDirectorySettings) -> Self {
        Self {
            source,
            builder: DeltaScriptFileBuilder,
            settings,
        }
    }

    pub fn settings(&self) -> &DeltaScriptDirectorySettings {
        &self.settings
    }

    /// Scripts of `category`, ordered by sequence number.
    ///
    /// A missing category directory means no scripts. Otherwise the files
    /// must be numbered densely from 1 with no repeats.
    pub fn get_scripts(
        &self,
        category: ScriptCategory,
        module: &Module,
        version: &VersionedDirectory,
    ) -> CoreResult<Vec<DeltaScript>> {
        let dir = version
            .directory()
            .join(self.settings.directory_name(category));

        if !self.source.exists(&dir) {
            log::debug!(
                "No directory found for category={category} in {}:{}",
                module.name(),
                version.name()
            );
            return Ok(Vec::new());
        }
        if !self.source.is_dir(&dir) {
            return Err(CoreError::ResourceError {
                message: format!(
                    "Invalid version directory provided: expected a directory at {}",
                    dir.display()
                ),
            });
        }

        let files = self.source.list_files(&dir, &self.settings.extension)?;
        if files.is_empty() {
            if category != ScriptCategory::Bidirectional && self.settings.rollback_scripts_must_exist
            {
                return Err(CoreError::NoScriptsFound {
                    message: format!(
                        "No '{}' scripts found in {}",
                        self.settings.extension,
                        dir.display()
                    ),
                });
            }
            return Ok(Vec::new());
        }

        let mut scripts = Vec::with_capacity(files.len());
        for file in &files {
            if let Some(script) = self.builder.build(self.source.as_ref(), file)? {
                scripts.push(script);
            }
        }
        scripts.sort();
        scripts.dedup();

        validate_sequence(&scripts, files.len(), version)?;
        Ok(scripts)
    }
}

/// Sequence numbers must be exactly `1..=file_count`
fn validate_sequence(
    scripts: &[DeltaScript],
    file_count: usize,
    version: &VersionedDirectory,
) -> CoreResult<()> {
    if scripts.len() != file_count {
        return Err(CoreError::invalid_script_sequence(format!(
            "Invalid script sequencing detected for version: '{}'",
            version.directory().display()
        )));
    }

    let (Some(first), Some(last)) = (scripts.first(), scripts.last()) else {
        return Ok(());
    };
    if first.sequence_number() != 1 {
        return Err(CoreError::invalid_script_sequence(format!(
            "Sequence number of the first file expected to be 1 but got {}",
            first.sequence_number()
        )));
    }
    if usize::try_from(last.sequence_number()).ok() != Some(file_count) {
        return Err(CoreError::invalid_script_sequence(format!(
            "Sequence number of the last file expected to be {file_count} but got {}",
            last.sequence_number()
        )));
    }

    let unique: BTreeSet<u32> = scripts.iter().map(DeltaScript::sequence_number).collect();
    if unique.len() != file_count {
        return Err(CoreError::invalid_script_sequence(
            "Sequence numbers must be unique",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "delta_service_test.rs"]
mod tests;
