//! Delta scripts and their categories

use crate::error::{CoreError, CoreResult};
use std::fmt;

/// Which subdirectory of a version a delta script comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScriptCategory {
    Upgrade,
    Rollback,
    Bidirectional,
}

impl ScriptCategory {
    /// Lowercase label, used as the output file stem and `file_type`
    pub fn label(self) -> &'static str {
        match self {
            ScriptCategory::Upgrade => "upgrade",
            ScriptCategory::Rollback => "rollback",
            ScriptCategory::Bidirectional => "bidirectional",
        }
    }
}

impl fmt::Display for ScriptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One numbered SQL file.
///
/// Ordered by sequence number; name and contents only break ties so that
/// two distinct files never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeltaScript {
    sequence_number: u32,
    name: String,
    contents: String,
}

impl DeltaScript {
    pub fn new(
        name: impl Into<String>,
        sequence_number: u32,
        contents: impl Into<String>,
    ) -> CoreResult<Self> {
        let name = name.into();
        if sequence_number == 0 {
            return Err(CoreError::InvalidScriptsDetected {
                message: format!("'{name}' must have a sequence number greater than 0"),
            });
        }
        Ok(Self {
            sequence_number,
            name,
            contents: contents.into(),
        })
    }

    /// File name, including the extension
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sequence_is_rejected() {
        let err = DeltaScript::new("0-init.sql", 0, "").unwrap_err();
        assert_eq!(err.code(), 3001);
    }

    #[test]
    fn test_scripts_order_by_sequence_number() {
        let mut scripts = vec![
            DeltaScript::new("10-z.sql", 10, "").unwrap(),
            DeltaScript::new("2-b.sql", 2, "").unwrap(),
            DeltaScript::new("1-a.sql", 1, "").unwrap(),
        ];
        scripts.sort();
        let seqs: Vec<u32> = scripts.iter().map(DeltaScript::sequence_number).collect();
        assert_eq!(seqs, [1, 2, 10]);
    }

    #[test]
    fn test_same_sequence_different_files_are_distinct() {
        let a = DeltaScript::new("1-a.sql", 1, "select 1;").unwrap();
        let b = DeltaScript::new("1-b.sql", 1, "select 1;").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(ScriptCategory::Upgrade.to_string(), "upgrade");
        assert_eq!(ScriptCategory::Rollback.label(), "rollback");
        assert_eq!(ScriptCategory::Bidirectional.label(), "bidirectional");
    }
}
