//! Error types for st-engine

use st_core::CoreError;
use st_template::TemplateError;
use thiserror::Error;

/// Errors raised while composing migration scripts
#[derive(Error, Debug)]
pub enum EngineError {
    /// Version, module, delta script, configuration or IO failure
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Template lookup or rendering failure
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Result type alias for EngineError
pub type EngineResult<T> = Result<T, EngineError>;
