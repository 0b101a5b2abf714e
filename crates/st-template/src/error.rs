//! Error types for st-template

use thiserror::Error;

/// Template lookup and rendering errors
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Template render error (T001)
    #[error("[T001] Template render error: {0}")]
    RenderError(String),

    /// No locator provides the template (T002)
    #[error("[T002] No template found: {name}")]
    MissingTemplate { name: String },

    /// Template override directory does not exist (T003)
    #[error("[T003] No directory found for the templates: {path}")]
    InvalidDirectory { path: String },

    /// Template file exists but cannot be read (T004)
    #[error("[T004] Failed to read template '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for TemplateError
pub type TemplateResult<T> = Result<T, TemplateError>;

impl From<minijinja::Error> for TemplateError {
    fn from(err: minijinja::Error) -> Self {
        TemplateError::RenderError(err.to_string())
    }
}
