use anyhow::Result;
use clap::{Parser, Subcommand};
use phasekit::commands::{audit, check, setup};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "phasekit")]
#[command(about = "Phase scaffolding CLI for the AEM electrolyzer research pipeline", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prepare the phase environment: packages, output tree, permissions,
    /// then run the generation entry point
    Setup {
        /// Phase directory (default from phasekit.toml, falling back to phases/phase1)
        #[arg(long)]
        phase: Option<PathBuf>,

        /// Stop after preparing the environment, without invoking generation
        #[arg(long)]
        skip_generation: bool,
    },

    /// Audit generated outputs: file counts per artifact type and the most
    /// recent validation/graph files
    Audit {
        /// Phase directory (default from phasekit.toml, falling back to phases/phase1)
        #[arg(long)]
        phase: Option<PathBuf>,

        /// Print the audit as JSON instead of the dashboard
        #[arg(long)]
        json: bool,

        /// Treat a missing output directory as an error
        #[arg(long)]
        strict: bool,
    },

    /// Record host specifications into the reports directory
    Check {
        /// Phase directory (default from phasekit.toml, falling back to phases/phase1)
        #[arg(long)]
        phase: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Setup {
            phase,
            skip_generation,
        } => setup::execute(phase, skip_generation),
        Commands::Audit {
            phase,
            json,
            strict,
        } => audit::execute(phase, json, strict),
        Commands::Check { phase } => check::execute(phase),
    }
}
