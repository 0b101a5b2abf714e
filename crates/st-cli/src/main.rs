//! stitch CLI - compose ordered SQL migration scripts from numbered delta files

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{generate, ls};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.global.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    match &cli.command {
        cli::Commands::Generate(args) => generate::execute(args, &cli.global),
        cli::Commands::Ls(args) => ls::execute(args, &cli.global),
    }
}
