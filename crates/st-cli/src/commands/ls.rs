//! List command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use st_core::{FsContentSource, StitchConfig};
use st_engine::{GenerationRequest, ServiceBuilder};
use std::path::Path;
use std::sync::Arc;

use crate::cli::{GlobalArgs, LsArgs, LsOutput};
use crate::commands::common::load_config;

/// Execute the ls command
pub(crate) fn execute(args: &LsArgs, _global: &GlobalArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let modules = args
        .modules
        .as_deref()
        .map(GenerationRequest::parse_module_list)
        .unwrap_or_default();

    let inventory = collect(
        &config,
        Path::new(&args.input_dir),
        &args.version_scheme,
        &modules,
    )?;

    match args.output {
        LsOutput::Table => print_table(&inventory),
        LsOutput::Json => print_json(&inventory)?,
    }
    Ok(())
}

/// Module information for display
#[derive(Debug, Serialize, PartialEq, Eq)]
struct ModuleInfo {
    module: String,
    directory: String,
    /// Ascending
    versions: Vec<String>,
    latest: Option<String>,
}

fn collect(
    config: &StitchConfig,
    input_dir: &Path,
    version_scheme: &str,
    module_names: &[String],
) -> Result<Vec<ModuleInfo>> {
    let builder = ServiceBuilder::new(config, Arc::new(FsContentSource))?;
    let module_service = builder
        .module_service(input_dir, !module_names.is_empty())
        .with_context(|| format!("Failed to read modules in {}", input_dir.display()))?;
    let version_service = builder.version_service(version_scheme)?;

    let modules = if module_names.is_empty() {
        module_service.list_all_modules()?
    } else {
        module_names
            .iter()
            .map(|name| {
                module_service
                    .find_module_by_name(name)?
                    .with_context(|| format!("No such module: {name}"))
            })
            .collect::<Result<Vec<_>>>()?
    };

    let mut inventory = Vec::with_capacity(modules.len());
    for module in modules {
        let versions: Vec<String> = version_service
            .list_versions(&module)
            .with_context(|| format!("Failed to list versions of {}", module.name()))?
            .iter()
            .map(|v| v.name().to_string())
            .collect();
        inventory.push(ModuleInfo {
            module: module.name().to_string(),
            directory: module.directory().display().to_string(),
            latest: versions.last().cloned(),
            versions,
        });
    }
    Ok(inventory)
}

/// Print modules in table format
fn print_table(modules: &[ModuleInfo]) {
    let name_width = modules
        .iter()
        .map(|m| m.module.len())
        .max()
        .unwrap_or(6)
        .max(6);
    let latest_width = modules
        .iter()
        .map(|m| m.latest.as_deref().map_or(1, str::len))
        .max()
        .unwrap_or(6)
        .max(6);

    println!("{:<name_width$}  {:<latest_width$}  VERSIONS", "MODULE", "LATEST");
    println!("{:-<name_width$}  {:-<latest_width$}  {}", "", "", "-".repeat(40));

    for module in modules {
        let versions = if module.versions.is_empty() {
            "-".to_string()
        } else {
            module.versions.join(", ")
        };
        println!(
            "{:<name_width$}  {:<latest_width$}  {}",
            module.module,
            module.latest.as_deref().unwrap_or("-"),
            versions
        );
    }

    println!();
    println!("{} module(s)", modules.len());
}

fn print_json(modules: &[ModuleInfo]) -> Result<()> {
    let json = serde_json::to_string_pretty(modules).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}
