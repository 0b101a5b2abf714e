//! Migration script rendering on minijinja

use crate::context::{ScriptContext, WriterContext};
use crate::error::TemplateResult;
use minijinja::{Environment, UndefinedBehavior};
use regex::Regex;
use std::sync::OnceLock;

/// Renders file and per-script templates.
///
/// Templates use `{{ name }}` placeholders; referencing a variable that is
/// not in the context is an error rather than an empty string.
pub struct ScriptRenderer {
    env: Environment<'static>,
}

impl ScriptRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        Self { env }
    }

    /// Render the file template with the writer variables
    pub fn render_file(&self, template: &str, writer: &WriterContext) -> TemplateResult<String> {
        Ok(self.env.render_str(template, writer.to_map())?)
    }

    /// Render a per-script template.
    ///
    /// Continuation lines of `script_contents` pick up the indentation of
    /// the template line holding the placeholder.
    pub fn render_script(
        &self,
        template: &str,
        writer: &WriterContext,
        script: &ScriptContext,
    ) -> TemplateResult<String> {
        let indented = ScriptContext {
            script_contents: indent_placeholder_value(template, &script.script_contents),
            ..script.clone()
        };
        Ok(self.env.render_str(template, indented.merged_over(writer))?)
    }
}

impl Default for ScriptRenderer {
    fn default() -> Self {
        Self::new()
    }
}

static CONTENTS_PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn contents_placeholder() -> &'static Regex {
    CONTENTS_PLACEHOLDER_RE
        .get_or_init(|| Regex::new(r"\{\{-?\s*script_contents\s*-?\}\}").expect("valid regex"))
}

/// Leading whitespace of the one template line holding the
/// `script_contents` placeholder; empty when zero or several lines hold it
pub fn placeholder_indentation(template: &str) -> &str {
    let mut lines = template
        .split('\n')
        .filter(|line| contents_placeholder().is_match(line));
    match (lines.next(), lines.next()) {
        (Some(line), None) => {
            let end = line
                .char_indices()
                .find(|(_, c)| !c.is_whitespace())
                .map(|(i, _)| i)
                .unwrap_or(line.len());
            &line[..end]
        }
        _ => "",
    }
}

/// Prefix every line of `value` except the first with the placeholder's indentation
pub fn indent_placeholder_value(template: &str, value: &str) -> String {
    let prefix = placeholder_indentation(template);
    if prefix.is_empty() {
        return value.to_string();
    }
    value
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "renderer_test.rs"]
mod tests;
