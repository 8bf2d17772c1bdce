use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{CALIBRATION_POOL_DIR, SEQUENCE_SEPARATOR};

use super::{FileFrame, FrameKind};

/// Where a frame lands inside the project, relative to the project root.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub project_relative_directory: PathBuf,
    pub project_relative_path: PathBuf,
}

impl Placement {
    pub fn in_directory(directory: PathBuf, file_name: &str) -> Self {
        let project_relative_path = directory.join(file_name);
        Self {
            project_relative_directory: directory,
            project_relative_path,
        }
    }

    /// Darks and biases: `any/Dark_60.0s_Bin1_gain100`. The filter is dropped
    /// since calibration frames of one exposure/binning/gain are pooled.
    pub fn pooled(frame: &FileFrame) -> Self {
        let directory = Path::new(CALIBRATION_POOL_DIR).join(frame.spec.pool_name());
        Self::in_directory(directory, &frame.file_name)
    }

    /// Flats: `{filter}/{set_key}`, or `{filter}/{set_key}__{sequence_id}` when
    /// the operator picked one of several flat sequences.
    pub fn flat(frame: &FileFrame, per_sequence: bool) -> Self {
        let leaf = if per_sequence {
            frame.sequence_key()
        } else {
            frame.spec.set_key.clone()
        };
        Self::in_directory(filter_directory(frame.spec.filter.as_deref(), &leaf), &frame.file_name)
    }

    /// Lights: `{filter}/{layer_set_id}`.
    pub fn light(frame: &FileFrame, layer_set_id: &str) -> Self {
        Self::in_directory(
            filter_directory(frame.spec.filter.as_deref(), layer_set_id),
            &frame.file_name,
        )
    }
}

fn filter_directory(filter: Option<&str>, leaf: &str) -> PathBuf {
    match filter {
        Some(filter) => Path::new(filter).join(leaf),
        None => PathBuf::from(leaf),
    }
}

/// A frame together with its resolved destination.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedFrame {
    #[serde(flatten)]
    pub frame: FileFrame,
    #[serde(flatten)]
    pub placement: Placement,
}

impl PlacedFrame {
    pub fn new(frame: FileFrame, placement: Placement) -> Self {
        Self { frame, placement }
    }

    /// Place a dark or bias. Other kinds need their layer set to be known.
    pub fn pooled(frame: FileFrame) -> Self {
        debug_assert!(frame.kind().is_pooled());
        let placement = Placement::pooled(&frame);
        Self::new(frame, placement)
    }

    pub fn kind(&self) -> FrameKind {
        self.frame.kind()
    }
}

/// Identifier of a manually matched layer set: `{set_key}__{sequence_id}`.
pub(crate) fn sequence_scoped_id(set_key: &str, sequence_id: &str) -> String {
    format!("{set_key}{SEQUENCE_SEPARATOR}{sequence_id}")
}
