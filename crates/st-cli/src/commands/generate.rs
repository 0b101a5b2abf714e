//! Generate command implementation

use anyhow::{Context, Result};
use st_engine::{generate, GenerationRequest, RunContext};
use std::path::PathBuf;

use crate::cli::{GenerateArgs, GlobalArgs};
use crate::commands::common::{load_config, resolve_author};

/// Execute the generate command
pub(crate) fn execute(args: &GenerateArgs, _global: &GlobalArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let request = GenerationRequest {
        engine: args.database.clone(),
        version_scheme: args.version_scheme.clone(),
        input_dir: PathBuf::from(&args.input_dir),
        output_dir: PathBuf::from(&args.output_dir),
        modules: args
            .modules
            .as_deref()
            .map(GenerationRequest::parse_module_list)
            .unwrap_or_default(),
        version: args.script_version.clone(),
    };
    let run = RunContext::now(resolve_author(args.author.as_deref()));

    log::info!(
        "Generating {} scripts from {} into {}",
        request.engine,
        request.input_dir.display(),
        request.output_dir.display()
    );
    let composed = generate(&config, &request, run).context("Failed to generate migration scripts")?;

    if composed.is_empty() {
        println!("No migration scripts generated");
        return Ok(());
    }
    for script in &composed {
        println!(
            "  {}:{} {} ({} scripts)",
            script.module, script.version, script.category, script.script_count
        );
    }
    println!("Generated {} migration script(s)", composed.len());
    Ok(())
}
