//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use st_core::StitchConfig;
use std::path::Path;

/// Load `--config` if given, else the built-in configuration
pub(crate) fn load_config(config: Option<&str>) -> Result<StitchConfig> {
    match config {
        Some(path) => StitchConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load configuration from {path}")),
        None => StitchConfig::builtin().context("Failed to load built-in configuration"),
    }
}

/// `--author`/`STITCH_AUTHOR`, then the OS user, then `unknown`
pub(crate) fn resolve_author(explicit: Option<&str>) -> String {
    explicit
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .or_else(|| {
            ["USER", "USERNAME"]
                .iter()
                .filter_map(|var| std::env::var(var).ok())
                .find(|a| !a.trim().is_empty())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
