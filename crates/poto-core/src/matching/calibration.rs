use std::fmt;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::consts::{MIN_TEMPERATURE_TOLERANCE_C, TEMPERATURE_EPSILON_C};
use crate::error::{PotoError, Result};
use crate::frame::{distinct, FileFrame};

use super::matches;

/// Accepted distance in °C between a light and its darks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemperatureTolerance(f64);

impl TemperatureTolerance {
    pub fn new(celsius: f64) -> Result<Self> {
        if !celsius.is_finite() || celsius < MIN_TEMPERATURE_TOLERANCE_C {
            return Err(PotoError::InvalidTolerance {
                value: celsius,
                min: MIN_TEMPERATURE_TOLERANCE_C,
            });
        }
        Ok(Self(celsius))
    }

    pub fn celsius(&self) -> f64 {
        self.0
    }

    /// Inclusive on both ends. Temperatures carry one decimal, the epsilon
    /// absorbs the binary rounding of differences like `-9.9 - -12.9`.
    pub fn accepts(&self, light_c: f64, dark_c: f64) -> bool {
        (dark_c - light_c).abs() <= self.0 + TEMPERATURE_EPSILON_C
    }
}

impl fmt::Display for TemperatureTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "±{}°C", self.0)
    }
}

/// A degraded but usable match. Shown before commit, never fatal.
#[derive(Clone, Debug, PartialEq)]
pub enum MatchWarning {
    NoDarks {
        layer_set_id: String,
        tolerance_c: f64,
        /// Darks of the right exposure, binning and gain, outside the window.
        darks_ignoring_temperature: usize,
    },
    NoBiases {
        layer_set_id: String,
        flat_set_key: String,
    },
    PooledDarkSequences {
        layer_set_id: String,
        sequence_ids: Vec<String>,
    },
    PooledBiasSequences {
        layer_set_id: String,
        sequence_ids: Vec<String>,
    },
    /// Another layer set copies a different selection of darks into the same
    /// pool directory, so this set's dark directory holds frames outside its
    /// own window.
    SharedDarkPool {
        layer_set_id: String,
        directory: PathBuf,
        shared_with: Vec<String>,
    },
}

impl MatchWarning {
    pub fn layer_set_id(&self) -> &str {
        match self {
            Self::NoDarks { layer_set_id, .. }
            | Self::NoBiases { layer_set_id, .. }
            | Self::PooledDarkSequences { layer_set_id, .. }
            | Self::PooledBiasSequences { layer_set_id, .. }
            | Self::SharedDarkPool { layer_set_id, .. } => layer_set_id,
        }
    }
}

impl fmt::Display for MatchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDarks {
                layer_set_id,
                tolerance_c,
                darks_ignoring_temperature,
            } => write!(
                f,
                "{layer_set_id}: no dark within ±{tolerance_c}°C \
                 ({darks_ignoring_temperature} matching when ignoring temperature)"
            ),
            Self::NoBiases {
                layer_set_id,
                flat_set_key,
            } => write!(f, "{layer_set_id}: no bias matches flat {flat_set_key}"),
            Self::PooledDarkSequences {
                layer_set_id,
                sequence_ids,
            } => write!(
                f,
                "{layer_set_id}: darks pooled from {} sequences ({})",
                sequence_ids.len(),
                sequence_ids.join(", ")
            ),
            Self::PooledBiasSequences {
                layer_set_id,
                sequence_ids,
            } => write!(
                f,
                "{layer_set_id}: biases pooled from {} sequences ({})",
                sequence_ids.len(),
                sequence_ids.join(", ")
            ),
            Self::SharedDarkPool {
                layer_set_id,
                directory,
                shared_with,
            } => write!(
                f,
                "{layer_set_id}: {} also receives other darks for {}",
                directory.display(),
                shared_with.join(", ")
            ),
        }
    }
}

/// Darks for the layer set represented by `light`.
///
/// Candidates share exposure, binning and gain with the light, then must sit
/// within `tolerance` of its temperature. Darks from several sequences are all
/// kept and reported.
pub fn select_darks(
    layer_set_id: &str,
    light: &FileFrame,
    darks: &[FileFrame],
    tolerance: TemperatureTolerance,
) -> (Vec<FileFrame>, Vec<MatchWarning>) {
    let compatible: Vec<&FileFrame> = darks
        .iter()
        .filter(|dark| matches(&light.spec, &dark.spec))
        .collect();
    let selected: Vec<FileFrame> = compatible
        .iter()
        .filter(|dark| tolerance.accepts(light.temperature_c, dark.temperature_c))
        .map(|dark| (*dark).clone())
        .collect();

    let mut warnings = Vec::new();
    if selected.is_empty() {
        warn!(
            "No dark for {} within {} of {}°C, {} darks match when ignoring temperature",
            layer_set_id,
            tolerance,
            light.temperature_c,
            compatible.len()
        );
        warnings.push(MatchWarning::NoDarks {
            layer_set_id: layer_set_id.to_string(),
            tolerance_c: tolerance.celsius(),
            darks_ignoring_temperature: compatible.len(),
        });
        return (selected, warnings);
    }

    let sequence_ids = distinct(selected.iter().map(|d| d.sequence_id.clone()));
    if sequence_ids.len() > 1 {
        warn!(
            "Darks for {} come from {} sequences, pooling them",
            layer_set_id,
            sequence_ids.len()
        );
        warnings.push(MatchWarning::PooledDarkSequences {
            layer_set_id: layer_set_id.to_string(),
            sequence_ids,
        });
    }
    debug!("{}: {} darks selected", layer_set_id, selected.len());
    (selected, warnings)
}

/// Biases for the flats represented by `flat`. Same pooling policy as darks.
pub fn select_biases(
    layer_set_id: &str,
    flat: &FileFrame,
    biases: &[FileFrame],
) -> (Vec<FileFrame>, Vec<MatchWarning>) {
    let selected: Vec<FileFrame> = biases
        .iter()
        .filter(|bias| matches(&flat.spec, &bias.spec))
        .cloned()
        .collect();

    let mut warnings = Vec::new();
    if selected.is_empty() {
        warn!("No bias for {} (flat {})", layer_set_id, flat.set_key());
        warnings.push(MatchWarning::NoBiases {
            layer_set_id: layer_set_id.to_string(),
            flat_set_key: flat.set_key().to_string(),
        });
        return (selected, warnings);
    }

    let sequence_ids = distinct(selected.iter().map(|b| b.sequence_id.clone()));
    if sequence_ids.len() > 1 {
        warn!(
            "Biases for {} come from {} sequences, pooling them",
            layer_set_id,
            sequence_ids.len()
        );
        warnings.push(MatchWarning::PooledBiasSequences {
            layer_set_id: layer_set_id.to_string(),
            sequence_ids,
        });
    }
    debug!("{}: {} biases selected", layer_set_id, selected.len());
    (selected, warnings)
}
