use std::fs;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::consts::THUMBNAIL_SUFFIX;
use crate::error::{PotoError, Result};
use crate::scan::is_asiair_dump;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CleanupStats {
    pub thumbnails_removed: usize,
    pub directories_removed: usize,
}

/// Remove ASIAIR thumbnails from `dir`, then every directory left empty.
/// `dir` itself is kept.
pub fn clear_dump(dir: &Path) -> Result<CleanupStats> {
    if !is_asiair_dump(dir) {
        return Err(PotoError::DirectoryState(format!(
            "{} is not an ASIAIR directory",
            dir.display()
        )));
    }

    let stats = CleanupStats {
        thumbnails_removed: drop_thumbnails(dir)?,
        directories_removed: drop_empty_directories(dir)?,
    };
    info!(
        thumbnails = stats.thumbnails_removed,
        directories = stats.directories_removed,
        "ASIAIR dump cleaned"
    );
    Ok(stats)
}

pub fn drop_thumbnails(dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.file_name().to_string_lossy().ends_with(THUMBNAIL_SUFFIX)
        {
            fs::remove_file(entry.path())?;
            debug!("deleted {}", entry.path().display());
            removed += 1;
        }
    }
    Ok(removed)
}

/// Children are visited before their parent, so nested empty trees go in one
/// pass.
pub fn drop_empty_directories(dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for entry in WalkDir::new(dir).follow_links(false).min_depth(1).contents_first(true) {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if fs::read_dir(entry.path())?.next().is_none() {
            fs::remove_dir(entry.path())?;
            debug!("deleted {}", entry.path().display());
            removed += 1;
        }
    }
    Ok(removed)
}
