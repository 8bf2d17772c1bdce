use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use poto_core::config::PotoConfig;
use tracing::debug;

const DEFAULT_CONFIG_FILE: &str = "poto.toml";

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save the default PotoConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let toml_str = toml::to_string_pretty(&PotoConfig::default())?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}

/// Read `path`, or `./poto.toml` when it exists, or fall back to defaults.
pub fn load(path: Option<&Path>) -> Result<PotoConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !local.is_file() {
                return Ok(PotoConfig::default());
            }
            local
        }
    };

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: PotoConfig = toml::from_str(&contents)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    debug!("loaded settings from {}", path.display());
    Ok(config)
}
