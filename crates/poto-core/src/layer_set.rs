use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::MS_PER_MINUTE;
use crate::error::{PotoError, Result};
use crate::frame::{distinct, sequence_scoped_id, FileFrame, PlacedFrame, Placement};
use crate::matching::LightFlatMatch;

/// Count and integration time of one light sequence inside a layer set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightSequence {
    pub sequence_id: String,
    pub count: usize,
    pub integration_minutes: f64,
}

/// Lights stacked together, with the calibration frames they need.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerSet {
    pub layer_set_id: String,
    pub filter: Option<String>,
    pub is_manual_match: bool,

    pub light_sequences: Vec<LightSequence>,
    pub light_total_count: usize,
    pub light_total_integration_minutes: f64,
    pub lights: Vec<PlacedFrame>,

    pub flat_set_key: String,
    pub flat_sequence_id: String,
    pub flats_count: usize,
    pub flats: Vec<PlacedFrame>,

    pub dark_set_key: Option<String>,
    pub darks_count: usize,
    pub dark_total_integration_minutes: f64,
    pub darks: Vec<PlacedFrame>,

    pub bias_set_key: Option<String>,
    pub biases_count: usize,
    pub biases: Vec<PlacedFrame>,
}

impl LayerSet {
    /// First light. Darks are matched against it.
    pub fn representative_light(&self) -> Option<&FileFrame> {
        self.lights.first().map(|placed| &placed.frame)
    }

    /// First flat. Biases are matched against it.
    pub fn representative_flat(&self) -> Option<&FileFrame> {
        self.flats.first().map(|placed| &placed.frame)
    }

    pub fn attach_darks(&mut self, darks: Vec<FileFrame>) {
        self.dark_set_key = darks.first().map(|d| d.set_key().to_string());
        self.darks_count = darks.len();
        self.dark_total_integration_minutes = total_minutes(&darks);
        self.darks = darks.into_iter().map(PlacedFrame::pooled).collect();
    }

    pub fn attach_biases(&mut self, biases: Vec<FileFrame>) {
        self.bias_set_key = biases.first().map(|b| b.set_key().to_string());
        self.biases_count = biases.len();
        self.biases = biases.into_iter().map(PlacedFrame::pooled).collect();
    }

    /// Missing darks or biases. Still stackable, with a worse result.
    pub fn is_degraded(&self) -> bool {
        self.darks.is_empty() || self.biases.is_empty()
    }

    /// Every placed frame: lights, flats, darks, then biases.
    pub fn frames(&self) -> impl Iterator<Item = &PlacedFrame> {
        self.lights
            .iter()
            .chain(&self.flats)
            .chain(&self.darks)
            .chain(&self.biases)
    }
}

fn total_minutes<'a>(frames: impl IntoIterator<Item = &'a FileFrame>) -> f64 {
    frames.into_iter().map(|f| f.spec.exposure_ms).sum::<f64>() / MS_PER_MINUTE
}

/// Fold light/flat matches into layer sets, without darks and biases yet.
///
/// Automatic matches of one light set collapse into a single layer set
/// spanning all its sequences. Each manual match is its own layer set.
pub fn build_layer_sets(
    matches: &[LightFlatMatch],
    lights: &[FileFrame],
    flats: &[FileFrame],
) -> Result<Vec<LayerSet>> {
    let mut layer_sets: Vec<LayerSet> = Vec::new();

    for pair in matches {
        let layer_set_id = pair.layer_set_id();
        if let Some(existing) = layer_sets.iter().find(|ls| ls.layer_set_id == layer_set_id) {
            if existing.flat_set_key != pair.flat.set_key
                || existing.flat_sequence_id != pair.flat.sequence_id
            {
                return Err(PotoError::Inconsistent(format!(
                    "layer set {layer_set_id} matched to flats {} and {}",
                    sequence_scoped_id(&existing.flat_set_key, &existing.flat_sequence_id),
                    pair.flat
                )));
            }
            continue;
        }

        let set_lights: Vec<&FileFrame> = lights
            .iter()
            .filter(|light| {
                if pair.is_manual_match {
                    pair.light.contains(light)
                } else {
                    light.set_key() == pair.light.set_key
                }
            })
            .collect();
        if set_lights.is_empty() {
            return Err(PotoError::Inconsistent(format!(
                "no light found for {}",
                pair.light
            )));
        }

        let set_flats: Vec<&FileFrame> = flats.iter().filter(|f| pair.flat.contains(f)).collect();
        if set_flats.is_empty() {
            return Err(PotoError::Inconsistent(format!(
                "no flat found for {}",
                pair.flat
            )));
        }

        let light_sequences = distinct(set_lights.iter().map(|l| l.sequence_id.as_str()))
            .into_iter()
            .map(|sequence_id| {
                let of_sequence: Vec<&FileFrame> = set_lights
                    .iter()
                    .copied()
                    .filter(|l| l.sequence_id == sequence_id)
                    .collect();
                LightSequence {
                    sequence_id: sequence_id.to_string(),
                    count: of_sequence.len(),
                    integration_minutes: total_minutes(of_sequence),
                }
            })
            .collect();

        let layer_set = LayerSet {
            filter: set_lights[0].spec.filter.clone(),
            is_manual_match: pair.is_manual_match,
            light_sequences,
            light_total_count: set_lights.len(),
            light_total_integration_minutes: total_minutes(set_lights.iter().copied()),
            lights: set_lights
                .iter()
                .map(|&light| PlacedFrame::new(light.clone(), Placement::light(light, &layer_set_id)))
                .collect(),
            flat_set_key: pair.flat.set_key.clone(),
            flat_sequence_id: pair.flat.sequence_id.clone(),
            flats_count: set_flats.len(),
            flats: set_flats
                .iter()
                .map(|&flat| {
                    PlacedFrame::new(flat.clone(), Placement::flat(flat, pair.is_manual_match))
                })
                .collect(),
            dark_set_key: None,
            darks_count: 0,
            dark_total_integration_minutes: 0.0,
            darks: Vec::new(),
            bias_set_key: None,
            biases_count: 0,
            biases: Vec::new(),
            layer_set_id,
        };
        debug!(
            "layer set {}: {} lights in {} sequences, {} flats",
            layer_set.layer_set_id,
            layer_set.light_total_count,
            layer_set.light_sequences.len(),
            layer_set.flats_count
        );
        layer_sets.push(layer_set);
    }

    Ok(layer_sets)
}
