//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// stitch - compose ordered SQL migration scripts from numbered delta files
#[derive(Parser, Debug)]
#[command(name = "stitch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate upgrade and rollback scripts
    Generate(GenerateArgs),

    /// List modules and their versions
    Ls(LsArgs),
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Database engine, e.g. mssql, mysql or postgresql
    #[arg(short = 'd', long)]
    pub database: String,

    /// Version scheme name from the configuration
    #[arg(short = 's', long, default_value = st_core::DEFAULT_VERSION_SCHEME)]
    pub version_scheme: String,

    /// Directory holding the delta scripts
    #[arg(short, long)]
    pub input_dir: String,

    /// Directory the migration scripts are written to
    #[arg(short, long)]
    pub output_dir: String,

    /// Version to generate (default: latest)
    #[arg(short = 'V', long)]
    pub script_version: Option<String>,

    /// Module names (comma-separated, default: no module layer)
    #[arg(short, long)]
    pub modules: Option<String>,

    /// Configuration file (default: built-in)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Recorded as the script author
    #[arg(long, env = "STITCH_AUTHOR")]
    pub author: Option<String>,
}

/// Arguments for the ls command
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Version scheme name from the configuration
    #[arg(short = 's', long, default_value = st_core::DEFAULT_VERSION_SCHEME)]
    pub version_scheme: String,

    /// Directory holding the delta scripts
    #[arg(short, long)]
    pub input_dir: String,

    /// Module names (comma-separated, default: no module layer)
    #[arg(short, long)]
    pub modules: Option<String>,

    /// Configuration file (default: built-in)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: LsOutput,
}

/// List output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
