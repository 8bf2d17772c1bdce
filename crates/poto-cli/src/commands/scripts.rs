use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use poto_core::config::PotoConfig;
use poto_core::scripts::{generate_scripts, run_scripts};

#[derive(Args)]
pub struct ScriptsArgs {
    /// Script template with {{lights}}, {{flats}}, {{darks}}... placeholders
    #[arg(short, long)]
    pub template: PathBuf,

    /// Project directory created by `poto prepare`
    pub project: PathBuf,
}

#[derive(Args)]
pub struct PreprocessArgs {
    #[command(flatten)]
    pub scripts: ScriptsArgs,

    /// Stacker executable, overrides the configured one
    #[arg(long)]
    pub stacker: Option<String>,
}

pub fn run_generate(args: &ScriptsArgs) -> Result<()> {
    let written = generate_scripts(&args.project, &args.template).with_context(|| {
        format!(
            "Failed to generate scripts from {} in {}",
            args.template.display(),
            args.project.display()
        )
    })?;
    println!("{} script(s) generated", written.len());
    Ok(())
}

pub fn run_preprocess(args: &PreprocessArgs, config: &PotoConfig) -> Result<()> {
    run_generate(&args.scripts)?;

    let stacker = args
        .stacker
        .as_deref()
        .unwrap_or(&config.stacker_executable);
    let count = run_scripts(&args.scripts.project, &args.scripts.template, stacker)
        .with_context(|| format!("Failed to run scripts with {stacker}"))?;
    println!("{count} script(s) run");
    Ok(())
}
