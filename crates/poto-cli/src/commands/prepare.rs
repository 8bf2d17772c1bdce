use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use poto_core::config::PotoConfig;
use poto_core::pipeline::{prepare_project_reported, PrepareOutcome, PrepareRequest};

use crate::progress::CopyProgress;
use crate::prompt::TermPrompter;
use crate::summary::{print_aborted, print_dispatch_summary, print_plan_summary};

#[derive(Args)]
pub struct PrepareArgs {
    /// Input directory, repeat for several nights
    #[arg(short, long = "input", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Project directory to create or refresh
    pub project: PathBuf,
}

pub fn run(args: &PrepareArgs, config: &PotoConfig) -> Result<()> {
    let request = PrepareRequest {
        inputs: args.inputs.clone(),
        project_dir: args.project.clone(),
        default_tolerance_c: config.default_temperature_tolerance,
    };

    let mut prompter = TermPrompter::new();
    let reporter = Arc::new(CopyProgress::new());
    let outcome = match prepare_project_reported(&request, &mut prompter, reporter, print_plan_summary)
    {
        Ok(outcome) => outcome,
        Err(e) if e.is_abort() => {
            print_aborted(&e.to_string());
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to prepare {}", args.project.display()))
        }
    };

    match outcome {
        PrepareOutcome::Dispatched {
            document_path,
            stats,
        } => print_dispatch_summary(&document_path, &stats),
        PrepareOutcome::Declined => print_aborted("nothing was written"),
    }
    Ok(())
}
