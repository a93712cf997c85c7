//! Fieldmap CLI - Command-line interface for Fieldmap
//!
//! Usage:
//!   fieldmap adapt --mapping <file> [--input <file>]          - Adapt JSON records
//!   fieldmap adapt --mappings <dir> --boundary <id>           - Adapt using a mapping directory
//!   fieldmap check <path>                                     - Validate mapping definitions
//!   fieldmap init [dir]                                       - Create example mappings

use clap::{Parser, Subcommand};
use cli::commands::{AdaptCommand, CheckCommand, InitCommand};

#[derive(Parser)]
#[command(name = "fieldmap")]
#[command(about = "Fieldmap - Rename record fields across producer/consumer boundaries")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Adapt JSON records from producer naming to consumer naming
    Adapt(AdaptCommand),
    /// Validate mapping definitions
    Check(CheckCommand),
    /// Create example mapping definitions
    Init(InitCommand),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries adapted JSON
    tracing_subscriber::fmt()
        .with_env_filter(cli::env_filter())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Adapt(cmd) => cmd.run(),
        Commands::Check(cmd) => cmd.run(),
        Commands::Init(cmd) => cmd.run(),
    }
}
