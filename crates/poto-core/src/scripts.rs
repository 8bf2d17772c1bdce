use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::consts::{GENERATED_SCRIPT_PREFIX, SCRIPT_PLACEHOLDERS};
use crate::error::{PotoError, Result};
use crate::frame::{distinct, FrameKind, PlacedFrame};
use crate::layer_set::LayerSet;
use crate::project::ProjectDocument;

/// Project-relative directories substituted into a script template.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptPaths {
    pub cwd: PathBuf,
    pub lights: PathBuf,
    pub flats: PathBuf,
    pub darks: PathBuf,
    pub biases: PathBuf,
    pub process: PathBuf,
    pub masters: PathBuf,
}

impl ScriptPaths {
    /// Resolve the directories of `layer_set`. Each kind must live in
    /// exactly one directory.
    pub fn for_layer_set(project_dir: &Path, layer_set: &LayerSet) -> Result<Self> {
        let filter_dir = match &layer_set.filter {
            Some(filter) => PathBuf::from(filter),
            None => PathBuf::new(),
        };
        Ok(Self {
            cwd: project_dir.to_path_buf(),
            lights: single_directory(layer_set, FrameKind::Light, &layer_set.lights)?,
            flats: single_directory(layer_set, FrameKind::Flat, &layer_set.flats)?,
            darks: single_directory(layer_set, FrameKind::Dark, &layer_set.darks)?,
            biases: single_directory(layer_set, FrameKind::Bias, &layer_set.biases)?,
            process: filter_dir.join(format!("{}_process", layer_set.layer_set_id)),
            masters: filter_dir.join(format!("{}_masters", layer_set.layer_set_id)),
        })
    }

    fn substitutions(&self) -> [(&'static str, String); 7] {
        [
            ("{{cwd}}", self.cwd.display().to_string()),
            ("{{lights}}", self.lights.display().to_string()),
            ("{{flats}}", self.flats.display().to_string()),
            ("{{darks}}", self.darks.display().to_string()),
            ("{{biases}}", self.biases.display().to_string()),
            ("{{process}}", self.process.display().to_string()),
            ("{{masters}}", self.masters.display().to_string()),
        ]
    }
}

fn single_directory(layer_set: &LayerSet, kind: FrameKind, frames: &[PlacedFrame]) -> Result<PathBuf> {
    let mut directories = distinct(
        frames
            .iter()
            .map(|f| f.placement.project_relative_directory.clone()),
    );
    match directories.len() {
        1 => Ok(directories.remove(0)),
        0 => Err(PotoError::Inconsistent(format!(
            "no {kind} directory for {}",
            layer_set.layer_set_id
        ))),
        n => Err(PotoError::Inconsistent(format!(
            "{n} {kind} directories for {}",
            layer_set.layer_set_id
        ))),
    }
}

pub fn template_has_placeholders(template: &str) -> bool {
    SCRIPT_PLACEHOLDERS.iter().any(|p| template.contains(p))
}

pub fn render_template(template: &str, paths: &ScriptPaths) -> String {
    paths
        .substitutions()
        .iter()
        .fold(template.to_string(), |script, (placeholder, value)| {
            script.replace(placeholder, value)
        })
}

/// `poto_{template file name}`.
pub fn generated_script_name(template_path: &Path) -> String {
    let name = template_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{GENERATED_SCRIPT_PREFIX}{name}")
}

/// Write one script per layer set from `template_path`. Returns the scripts
/// written, in layer set order.
pub fn generate_scripts(project_dir: &Path, template_path: &Path) -> Result<Vec<PathBuf>> {
    let template = fs::read_to_string(template_path)?;
    if !template_has_placeholders(&template) {
        warn!(
            "Template {} has no placeholder, every layer set gets the same script",
            template_path.display()
        );
    }
    let document = ProjectDocument::read(project_dir)?;
    let script_name = generated_script_name(template_path);

    let mut written = Vec::with_capacity(document.layer_sets.len());
    for layer_set in &document.layer_sets {
        let paths = ScriptPaths::for_layer_set(project_dir, layer_set)?;
        fs::create_dir_all(project_dir.join(&paths.process))?;
        fs::create_dir_all(project_dir.join(&paths.masters))?;

        let script_path = project_dir.join(&paths.process).join(&script_name);
        fs::write(&script_path, render_template(&template, &paths))?;
        info!("Generated {}", script_path.display());
        for (placeholder, value) in paths.substitutions() {
            debug!("- {placeholder} -> {value}");
        }
        written.push(script_path);
    }
    Ok(written)
}

/// Every script generated from `template_path` under `project_dir`, sorted.
pub fn find_generated_scripts(project_dir: &Path, template_path: &Path) -> Result<Vec<PathBuf>> {
    let script_name = generated_script_name(template_path);
    let mut scripts = Vec::new();
    for entry in WalkDir::new(project_dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name().to_string_lossy() == script_name {
            scripts.push(entry.path().to_path_buf());
        }
    }
    Ok(scripts)
}

/// Run `executable -s <script>` for every generated script, stopping at the
/// first failure. Output goes straight to the terminal.
pub fn run_scripts(project_dir: &Path, template_path: &Path, executable: &str) -> Result<usize> {
    let cwd = project_dir.canonicalize()?;
    let scripts = find_generated_scripts(&cwd, template_path)?;
    debug!("{} scripts found to run, cwd {}", scripts.len(), cwd.display());

    for script in &scripts {
        info!("Running script {}", script.display());
        let status = Command::new(executable)
            .arg("-s")
            .arg(script)
            .current_dir(&cwd)
            .status()?;
        if !status.success() {
            return Err(PotoError::ScriptFailed {
                script: script.clone(),
                status: status.to_string(),
            });
        }
    }
    Ok(scripts.len())
}
