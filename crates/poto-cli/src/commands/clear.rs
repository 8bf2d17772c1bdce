use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use poto_core::cleanup::clear_dump;

use crate::summary::print_cleanup_summary;

#[derive(Args)]
pub struct ClearArgs {
    /// ASIAIR dump directory (holds Autorun/ or Plan/)
    pub dir: PathBuf,
}

pub fn run(args: &ClearArgs) -> Result<()> {
    let stats = clear_dump(&args.dir)
        .with_context(|| format!("Failed to clear {}", args.dir.display()))?;
    print_cleanup_summary(&args.dir, &stats);
    Ok(())
}
