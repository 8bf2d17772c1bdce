use std::path::PathBuf;

use crate::layer_set::LayerSet;
use crate::matching::{MatchWarning, TemperatureTolerance};
use crate::project::ProjectMetrics;

/// Step of the prepare command, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrepareStage {
    Scanning,
    Matching,
    Writing,
    Copying,
}

impl std::fmt::Display for PrepareStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scanning => write!(f, "Scanning inputs"),
            Self::Matching => write!(f, "Matching frames"),
            Self::Writing => write!(f, "Writing project"),
            Self::Copying => write!(f, "Copying frames"),
        }
    }
}

/// Thread-safe progress reporting for the prepare command.
///
/// Implementors can use this to drive progress bars or logging. All methods
/// have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items in
    /// this stage (e.g., files to copy), if known.
    fn begin_stage(&self, _stage: PrepareStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// What a prepare run is asked to do.
#[derive(Clone, Debug)]
pub struct PrepareRequest {
    pub inputs: Vec<PathBuf>,
    pub project_dir: PathBuf,
    /// Proposed to the operator as the dark temperature window.
    pub default_tolerance_c: f64,
}

/// Everything decided before anything is written.
#[derive(Clone, Debug)]
pub struct ProjectPlan {
    pub project_dir: PathBuf,
    pub layer_sets: Vec<LayerSet>,
    pub warnings: Vec<MatchWarning>,
    pub tolerance: TemperatureTolerance,
    pub metrics: ProjectMetrics,
    /// Frames found in the inputs, before matching.
    pub scanned_frames: usize,
}

impl ProjectPlan {
    pub fn warnings_for<'a>(&'a self, layer_set_id: &'a str) -> impl Iterator<Item = &'a MatchWarning> {
        self.warnings
            .iter()
            .filter(move |w| w.layer_set_id() == layer_set_id)
    }
}

/// Counts of a completed dispatch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub copied_files: usize,
    pub created_directories: usize,
}

/// How a prepare run ended without error.
#[derive(Clone, Debug)]
pub enum PrepareOutcome {
    Dispatched {
        document_path: PathBuf,
        stats: DispatchStats,
    },
    /// The operator declined the final confirmation. Nothing was written.
    Declined,
}
