use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Result;
use crate::frame::PlacedFrame;
use crate::project::ProjectDocument;

use super::types::{DispatchStats, PrepareStage, ProgressReporter};

/// Write the document and copy every placed frame into `project_dir`.
///
/// A frame shared by several layer sets (pooled darks and biases, or flats)
/// is copied once.
pub fn dispatch_project(
    document: &ProjectDocument,
    project_dir: &Path,
    reporter: &dyn ProgressReporter,
) -> Result<(PathBuf, DispatchStats)> {
    reporter.begin_stage(PrepareStage::Writing, None);
    fs::create_dir_all(project_dir)?;
    let document_path = document.write(project_dir)?;
    reporter.finish_stage();

    let mut seen: HashSet<&Path> = HashSet::new();
    let frames: Vec<&PlacedFrame> = document
        .layer_sets
        .iter()
        .flat_map(|ls| ls.frames())
        .filter(|placed| seen.insert(placed.placement.project_relative_path.as_path()))
        .collect();

    let mut stats = DispatchStats::default();
    let mut created: HashSet<PathBuf> = HashSet::new();
    reporter.begin_stage(PrepareStage::Copying, Some(frames.len()));
    for (i, placed) in frames.iter().enumerate() {
        let directory = project_dir.join(&placed.placement.project_relative_directory);
        if !created.contains(&directory) {
            if !directory.is_dir() {
                fs::create_dir_all(&directory)?;
                stats.created_directories += 1;
            }
            created.insert(directory);
        }

        let destination = project_dir.join(&placed.placement.project_relative_path);
        fs::copy(&placed.frame.source_file_path, &destination)?;
        debug!(
            "copied {} -> {}",
            placed.frame.source_file_path.display(),
            destination.display()
        );
        stats.copied_files += 1;
        reporter.advance(i + 1);
    }
    reporter.finish_stage();

    info!(
        copied = stats.copied_files,
        directories = stats.created_directories,
        "Dispatch complete"
    );
    Ok((document_path, stats))
}
