//! Error types for st-core

use thiserror::Error;

/// Core error type for stitch
#[derive(Error, Debug)]
pub enum CoreError {
    /// E1000: A resource exists but cannot be used
    #[error("[E1000] Resource error: {message}")]
    ResourceError { message: String },

    /// E1001: A required resource or configuration key is missing
    #[error("[E1001] No resource found: {message}")]
    MissingResource { message: String },

    /// E2000: Malformed version, separator or pre-release tag
    #[error("[E2000] Invalid version: {message}")]
    InvalidVersion { message: String },

    /// E2001: Version directory does not line up with its contents or name
    #[error("[E2001] Invalid version directory: {message}")]
    VersionDirectoryError { message: String },

    /// E3000: A mandatory script category has no scripts
    #[error("[E3000] No scripts available/found: {message}")]
    NoScriptsFound { message: String },

    /// E3001: A delta script cannot be used
    #[error("[E3001] Unsupported or invalid scripts detected: {message}")]
    InvalidScriptsDetected { message: String },

    /// E3002: Delta script numbering is not a dense 1..N sequence
    #[error("[E3002] Invalid script sequence numbers detected: {message}")]
    InvalidScriptSequence { message: String },

    /// E4000: Module name cannot be resolved
    #[error("[E4000] Invalid module: {message}")]
    InvalidModule { message: String },

    /// E4001: Module base directory is malformed
    #[error("[E4001] Invalid module directory: {message}")]
    ModuleDirectoryError { message: String },

    /// E5000: IO error
    #[error("[E5000] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E5001: IO error with file path context
    #[error("[E5001] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E5002: Configuration YAML could not be parsed
    #[error("[E5002] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidVersion`]
    pub fn invalid_version(message: impl Into<String>) -> Self {
        CoreError::InvalidVersion {
            message: message.into(),
        }
    }

    /// Shorthand for [`CoreError::MissingResource`]
    pub fn missing_resource(message: impl Into<String>) -> Self {
        CoreError::MissingResource {
            message: message.into(),
        }
    }

    /// Shorthand for [`CoreError::InvalidScriptSequence`]
    pub fn invalid_script_sequence(message: impl Into<String>) -> Self {
        CoreError::InvalidScriptSequence {
            message: message.into(),
        }
    }

    /// Shorthand for [`CoreError::VersionDirectoryError`]
    pub fn version_directory(message: impl Into<String>) -> Self {
        CoreError::VersionDirectoryError {
            message: message.into(),
        }
    }

    /// Numeric error code, stable across releases
    pub fn code(&self) -> u16 {
        match self {
            CoreError::ResourceError { .. } => 1000,
            CoreError::MissingResource { .. } => 1001,
            CoreError::InvalidVersion { .. } => 2000,
            CoreError::VersionDirectoryError { .. } => 2001,
            CoreError::NoScriptsFound { .. } => 3000,
            CoreError::InvalidScriptsDetected { .. } => 3001,
            CoreError::InvalidScriptSequence { .. } => 3002,
            CoreError::InvalidModule { .. } => 4000,
            CoreError::ModuleDirectoryError { .. } => 4001,
            CoreError::Io(_) => 5000,
            CoreError::IoWithPath { .. } => 5001,
            CoreError::YamlParse(_) => 5002,
        }
    }
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
