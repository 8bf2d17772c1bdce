mod commands;
mod progress;
mod prompt;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "poto", about = "Astrophotography frame organizer")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (TOML). Defaults to ./poto.toml when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sort ASIAIR frames into a project directory
    Prepare(commands::prepare::PrepareArgs),
    /// Generate one stacking script per layer set from a template
    Scripts(commands::scripts::ScriptsArgs),
    /// Generate the scripts, then run them with the stacker
    Preprocess(commands::scripts::PreprocessArgs),
    /// Delete thumbnails and empty directories from an ASIAIR dump
    Clear(commands::clear::ClearArgs),
    /// Print the default settings as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match &cli.command {
        Commands::Config(args) => commands::config::run(args),
        Commands::Clear(args) => commands::clear::run(args),
        Commands::Scripts(args) => commands::scripts::run_generate(args),
        Commands::Prepare(args) => {
            let settings = commands::config::load(cli.config.as_deref())?;
            commands::prepare::run(args, &settings)
        }
        Commands::Preprocess(args) => {
            let settings = commands::config::load(cli.config.as_deref())?;
            commands::scripts::run_preprocess(args, &settings)
        }
    }
}
