//! Template context types for migration script rendering.
//!
//! A [`WriterContext`] is built once per output file; a [`ScriptContext`]
//! per delta script. When a script is rendered its context is laid over the
//! writer context, so `script_count` means the sibling count there.

use minijinja::Value;
use std::collections::BTreeMap;

/// Variables available to every template of one output file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterContext {
    /// Canonical version name
    pub release_label: String,
    /// ISO-8601 local date-time the run started
    pub creation_timestamp: String,
    /// Who ran the generator
    pub script_author: String,
    pub module_name: String,
    /// `upgrade` or `rollback`
    pub file_type: String,
    /// Regular plus included bidirectional scripts
    pub script_count: usize,
    pub change_log_table_name: String,
    pub statement_separator: String,
    pub statement_delimiter: String,
}

/// Variables for one delta script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptContext {
    pub script_name: String,
    pub script_contents: String,
    /// 1-based position within its own list
    pub index: usize,
    /// Size of that list
    pub script_count: usize,
    pub script_sequence_number: u32,
}

/// Flattened template variables
pub type ContextMap = BTreeMap<&'static str, Value>;

impl WriterContext {
    pub fn to_map(&self) -> ContextMap {
        let mut map = ContextMap::new();
        map.insert("release_label", Value::from(self.release_label.as_str()));
        map.insert("creation_timestamp", Value::from(self.creation_timestamp.as_str()));
        map.insert("script_author", Value::from(self.script_author.as_str()));
        map.insert("module_name", Value::from(self.module_name.as_str()));
        map.insert("file_type", Value::from(self.file_type.as_str()));
        map.insert("script_count", Value::from(self.script_count));
        map.insert("change_log_table_name", Value::from(self.change_log_table_name.as_str()));
        map.insert("statement_separator", Value::from(self.statement_separator.as_str()));
        map.insert("statement_delimiter", Value::from(self.statement_delimiter.as_str()));
        map
    }
}

impl ScriptContext {
    /// Writer variables overlaid with this script's
    pub fn merged_over(&self, writer: &WriterContext) -> ContextMap {
        let mut map = writer.to_map();
        map.insert("script_name", Value::from(self.script_name.as_str()));
        map.insert("script_contents", Value::from(self.script_contents.as_str()));
        map.insert("index", Value::from(self.index));
        map.insert("script_count", Value::from(self.script_count));
        map.insert("script_sequence_number", Value::from(self.script_sequence_number));
        map
    }
}
