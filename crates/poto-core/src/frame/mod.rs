mod parse;
mod placement;
mod sequence;

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub use parse::{parse_exposure_ms, parse_file_name, parse_frame, FrameName};
pub use placement::{PlacedFrame, Placement};
pub(crate) use placement::sequence_scoped_id;
pub use sequence::{assign_sequence, assign_sequences, format_sequence_id, SequenceSlot};

/// Kind of exposure, as written at the start of every frame filename.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameKind {
    Light,
    Dark,
    Bias,
    Flat,
}

impl FrameKind {
    pub const ALL: [FrameKind; 4] = [Self::Light, Self::Dark, Self::Bias, Self::Flat];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::Bias => "Bias",
            Self::Flat => "Flat",
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Darks and biases are pooled across filters in the project.
    pub fn is_pooled(&self) -> bool {
        matches!(self, Self::Dark | Self::Bias)
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acquisition configuration of a frame.
///
/// Two frames with the same `set_key` belong to the same set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSpec {
    pub kind: FrameKind,
    /// Raw exposure text: `60.0s`, `810.0ms`.
    pub exposure: String,
    pub exposure_ms: f64,
    /// `Bin1`, `Bin2`...
    pub binning: String,
    /// Filter wheel slot name, without spaces. `None` when no wheel is used.
    pub filter: Option<String>,
    pub gain: u32,
    /// `Flat_520.0ms_Bin1_O_gain0` or `Flat_520.0ms_Bin1_gain0`.
    pub set_key: String,
}

impl ImageSpec {
    pub fn new(
        kind: FrameKind,
        exposure: &str,
        exposure_ms: f64,
        binning: &str,
        filter: Option<&str>,
        gain: u32,
    ) -> Self {
        let filter = filter.and_then(normalize_filter);
        let set_key = Self::compute_set_key(kind, exposure, binning, filter.as_deref(), gain);
        Self {
            kind,
            exposure: exposure.to_string(),
            exposure_ms,
            binning: binning.to_string(),
            filter,
            gain,
            set_key,
        }
    }

    pub fn compute_set_key(
        kind: FrameKind,
        exposure: &str,
        binning: &str,
        filter: Option<&str>,
        gain: u32,
    ) -> String {
        match filter {
            Some(filter) => format!("{kind}_{exposure}_{binning}_{filter}_gain{gain}"),
            None => format!("{kind}_{exposure}_{binning}_gain{gain}"),
        }
    }

    /// Filter-less name shared by every dark (or bias) of the same exposure,
    /// binning and gain: `Dark_60.0s_Bin1_gain100`.
    pub fn pool_name(&self) -> String {
        Self::compute_set_key(self.kind, &self.exposure, &self.binning, None, self.gain)
    }
}

/// Strip every whitespace from a filter name. Empty names collapse to `None`.
fn normalize_filter(filter: &str) -> Option<String> {
    let stripped: String = filter.chars().filter(|c| !c.is_whitespace()).collect();
    (!stripped.is_empty()).then_some(stripped)
}

/// A frame found on disk, with its identity and its position in a sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFrame {
    #[serde(flatten)]
    pub spec: ImageSpec,
    pub file_name: String,
    pub extension: String,
    /// Camera-local capture time, no timezone.
    pub timestamp: NaiveDateTime,
    /// Index encoded in the filename. Starts at 1, gaps allowed.
    pub frame_index: u32,
    pub temperature_c: f64,
    pub source_directory: PathBuf,
    pub source_file_path: PathBuf,
    /// Timestamp of the first frame of the sequence, `20240626-010850`.
    pub sequence_id: String,
    pub sequence_position: u32,
}

impl FileFrame {
    pub fn new(name: FrameName, source_directory: PathBuf, slot: SequenceSlot) -> Self {
        let source_file_path = source_directory.join(&name.file_name);
        Self {
            spec: name.spec,
            file_name: name.file_name,
            extension: name.extension,
            timestamp: name.timestamp,
            frame_index: name.frame_index,
            temperature_c: name.temperature_c,
            source_directory,
            source_file_path,
            sequence_id: slot.sequence_id,
            sequence_position: slot.sequence_position,
        }
    }

    pub fn kind(&self) -> FrameKind {
        self.spec.kind
    }

    pub fn set_key(&self) -> &str {
        &self.spec.set_key
    }

    /// `{set_key}__{sequence_id}`, unique per acquisition run.
    pub fn sequence_key(&self) -> String {
        sequence_scoped_id(&self.spec.set_key, &self.sequence_id)
    }
}

/// Distinct values in first-seen order.
pub(crate) fn distinct<T, I>(items: I) -> Vec<T>
where
    T: PartialEq,
    I: IntoIterator<Item = T>,
{
    let mut out: Vec<T> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
