use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{PotoError, Result};
use crate::frame::FileFrame;
use crate::layer_set::{build_layer_sets, LayerSet};
use crate::matching::{
    match_lights_to_flats, preselect_flats, select_biases, select_darks, FramesByKind,
    MatchWarning, TemperatureTolerance,
};
use crate::project::ProjectMetrics;
use crate::prompt::Prompter;
use crate::scan::collect_input_frames;

use super::types::{PrepareRequest, PrepareStage, ProgressReporter, ProjectPlan};

/// Scan the inputs and decide every placement. Reads only.
pub fn plan_project(
    request: &PrepareRequest,
    prompter: &mut dyn Prompter,
    reporter: &dyn ProgressReporter,
) -> Result<ProjectPlan> {
    reporter.begin_stage(PrepareStage::Scanning, Some(request.inputs.len()));
    let mut frames: Vec<FileFrame> = Vec::new();
    for (i, input) in request.inputs.iter().enumerate() {
        frames.extend(collect_input_frames(input, prompter)?);
        reporter.advance(i + 1);
    }
    reporter.finish_stage();

    let scanned_frames = frames.len();
    let by_kind = FramesByKind::partition(frames);
    info!(
        lights = by_kind.lights.len(),
        flats = by_kind.flats.len(),
        darks = by_kind.darks.len(),
        biases = by_kind.biases.len(),
        "Found {} .fit files in input directories",
        scanned_frames
    );

    reporter.begin_stage(PrepareStage::Matching, None);
    let flats = preselect_flats(&by_kind.flats, &by_kind.lights);
    let matches = match_lights_to_flats(&flats, &by_kind.lights, prompter)?;
    let mut layer_sets = build_layer_sets(&matches, &by_kind.lights, &flats)?;
    if layer_sets.is_empty() {
        return Err(PotoError::NoMatch(
            "no light frame could be matched with a flat".to_string(),
        ));
    }

    info!(
        "Found {} darks and biases (without temperature filtering)",
        by_kind.darks.len() + by_kind.biases.len()
    );
    let tolerance =
        TemperatureTolerance::new(prompter.temperature_tolerance(request.default_tolerance_c)?)?;
    let warnings = attach_calibration(&mut layer_sets, &by_kind, tolerance)?;
    reporter.finish_stage();

    let metrics = ProjectMetrics::from_layer_sets(&layer_sets);
    Ok(ProjectPlan {
        project_dir: request.project_dir.clone(),
        layer_sets,
        warnings,
        tolerance,
        metrics,
        scanned_frames,
    })
}

/// Attach darks and biases to every layer set and collect what went wrong.
pub fn attach_calibration(
    layer_sets: &mut [LayerSet],
    frames: &FramesByKind,
    tolerance: TemperatureTolerance,
) -> Result<Vec<MatchWarning>> {
    let mut warnings = Vec::new();

    for layer_set in layer_sets.iter_mut() {
        let (Some(light), Some(flat)) = (layer_set.representative_light(), layer_set.representative_flat())
        else {
            return Err(PotoError::Inconsistent(format!(
                "layer set {} has no light or no flat",
                layer_set.layer_set_id
            )));
        };

        let (darks, dark_warnings) =
            select_darks(&layer_set.layer_set_id, light, &frames.darks, tolerance);
        let (biases, bias_warnings) = select_biases(&layer_set.layer_set_id, flat, &frames.biases);

        layer_set.attach_darks(darks);
        layer_set.attach_biases(biases);
        warnings.extend(dark_warnings);
        warnings.extend(bias_warnings);
    }
    warnings.extend(shared_dark_pools(layer_sets));

    info!("Light - Dark matching summary:");
    for layer_set in layer_sets.iter() {
        debug!(
            "- {} -> {} ({} files / {} minutes)",
            layer_set.layer_set_id,
            layer_set.dark_set_key.as_deref().unwrap_or("no darks matched"),
            layer_set.darks_count,
            layer_set.dark_total_integration_minutes
        );
    }
    info!("Flat - Bias matching summary:");
    for layer_set in layer_sets.iter() {
        debug!(
            "- {} {} -> {} ({} files)",
            layer_set.flat_set_key,
            layer_set.flat_sequence_id,
            layer_set.bias_set_key.as_deref().unwrap_or("no biases matched"),
            layer_set.biases_count
        );
    }

    Ok(warnings)
}

/// Layer sets whose darks land in one pool directory but differ in selection.
fn shared_dark_pools(layer_sets: &[LayerSet]) -> Vec<MatchWarning> {
    let mut warnings = Vec::new();
    for layer_set in layer_sets {
        let Some(directory) = dark_directory(layer_set) else {
            continue;
        };
        let own = dark_paths(layer_set);
        let shared_with: Vec<String> = layer_sets
            .iter()
            .filter(|other| other.layer_set_id != layer_set.layer_set_id)
            .filter(|other| dark_directory(other) == Some(directory))
            .filter(|other| dark_paths(other) != own)
            .map(|other| other.layer_set_id.clone())
            .collect();
        if shared_with.is_empty() {
            continue;
        }

        warn!(
            "{} shares {} with {} but uses other darks",
            layer_set.layer_set_id,
            directory.display(),
            shared_with.join(", ")
        );
        warnings.push(MatchWarning::SharedDarkPool {
            layer_set_id: layer_set.layer_set_id.clone(),
            directory: directory.to_path_buf(),
            shared_with,
        });
    }
    warnings
}

fn dark_directory(layer_set: &LayerSet) -> Option<&Path> {
    layer_set
        .darks
        .first()
        .map(|d| d.placement.project_relative_directory.as_path())
}

fn dark_paths(layer_set: &LayerSet) -> BTreeSet<&Path> {
    layer_set
        .darks
        .iter()
        .map(|d| d.placement.project_relative_path.as_path())
        .collect()
}
