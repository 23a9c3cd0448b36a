//! # lexec CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::path::PathBuf;

use clap::Parser;

use lexec_cli::EngineConfig;

/// Criminal-execution standing engine.
///
/// Derives custody, execution, conviction, remission and status standing
/// from case files.
#[derive(Parser, Debug)]
#[command(name = "lexec", version, about)]
struct Cli {
    /// Engine configuration file (YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Derive the full standing of a case.
    Standing(lexec_cli::standing::StandingArgs),
    /// Compute the remission ledger of a case.
    Remission(lexec_cli::remission::RemissionArgs),
    /// Render a status line.
    Status(lexec_cli::status::StatusArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if cli.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }

    let config = EngineConfig::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Standing(args) => lexec_cli::standing::run(args, &config),
        Commands::Remission(args) => lexec_cli::remission::run(args, &config),
        Commands::Status(args) => lexec_cli::status::run(args),
    }
}
