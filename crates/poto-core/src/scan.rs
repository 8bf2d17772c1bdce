use std::fmt;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::consts::{
    ASIAIR_AUTORUN_DIR, ASIAIR_PLAN_DIR, FRAME_EXTENSION, OS_ARTIFACT_NAMES,
    RESOURCE_FORK_PREFIX, THUMBNAIL_SUFFIX,
};
use crate::error::{PotoError, Result};
use crate::frame::{assign_sequences, parse_file_name, FileFrame};
use crate::prompt::{choose_one, Prompter};

/// Recursively scan `dir` and parse every frame file, in listing order.
///
/// Entries are visited depth-first with each directory listed by file name.
/// Thumbnails, OS artifacts and non-`.fit` files are skipped. A `.fit` file
/// that does not follow the naming convention fails the whole scan.
pub fn scan_directory(dir: &Path) -> Result<Vec<FileFrame>> {
    let root = dir.canonicalize()?;
    let mut names = Vec::new();

    for entry in WalkDir::new(&root).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        let path = entry.path();
        let relative = path.strip_prefix(&root).unwrap_or(path);
        if is_ignored(relative) {
            debug!("skipping {:?}", relative);
            continue;
        }
        if !(entry.file_type().is_file() || entry.path_is_symlink()) || !is_frame_file(path) {
            debug!("skipping {:?}", relative);
            continue;
        }

        let file_name = entry
            .file_name()
            .to_str()
            .ok_or_else(|| PotoError::parse(&entry.file_name().to_string_lossy(), "not UTF-8"))?;
        let name = parse_file_name(file_name)?;
        let source_directory = path.parent().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
        names.push((name, source_directory));
    }

    let frames = assign_sequences(names);
    debug!("scan_directory {:?}: {} frames", root, frames.len());
    Ok(frames)
}

/// Thumbnails, `.DS_Store`, `Thumbs.db` and anything under a `._` segment.
pub fn is_ignored(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    name.ends_with(THUMBNAIL_SUFFIX)
        || OS_ARTIFACT_NAMES.contains(&name)
        || path.components().any(|c| {
            c.as_os_str()
                .to_str()
                .is_some_and(|s| s.starts_with(RESOURCE_FORK_PREFIX))
        })
}

pub fn is_frame_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(FRAME_EXTENSION)
}

/// Which part of an ASIAIR dump to import when both subdirectories hold frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DumpSource {
    Autorun,
    Plan,
    Both,
}

impl DumpSource {
    pub const ALL: [DumpSource; 3] = [Self::Autorun, Self::Plan, Self::Both];

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.to_string() == label)
    }
}

impl fmt::Display for DumpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Autorun => write!(f, "Use Autorun directory"),
            Self::Plan => write!(f, "Use Plan directory"),
            Self::Both => write!(f, "Use both directories"),
        }
    }
}

/// True when `dir` looks like an ASIAIR dump (has `Autorun/` or `Plan/`).
pub fn is_asiair_dump(dir: &Path) -> bool {
    dir.join(ASIAIR_AUTORUN_DIR).is_dir() || dir.join(ASIAIR_PLAN_DIR).is_dir()
}

/// Collect the frames of one input root.
///
/// Plain directories are scanned whole. In an ASIAIR dump only `Autorun/` and
/// `Plan/` are scanned; when both hold frames the operator picks.
pub fn collect_input_frames(input: &Path, prompter: &mut dyn Prompter) -> Result<Vec<FileFrame>> {
    if !is_asiair_dump(input) {
        let frames = scan_directory(input)?;
        if frames.is_empty() {
            return Err(PotoError::NoFrames(input.to_path_buf()));
        }
        info!("Found {} FITS in input dir {}", frames.len(), input.display());
        return Ok(frames);
    }

    debug!("ASIAIR dump detected in {}", input.display());
    let autorun = scan_if_present(&input.join(ASIAIR_AUTORUN_DIR))?;
    let plan = scan_if_present(&input.join(ASIAIR_PLAN_DIR))?;

    let frames = match (autorun.is_empty(), plan.is_empty()) {
        (true, true) => return Err(PotoError::NoFrames(input.to_path_buf())),
        (false, true) => autorun,
        (true, false) => plan,
        (false, false) => {
            let labels: Vec<String> = DumpSource::ALL.iter().map(ToString::to_string).collect();
            let answer = choose_one(
                prompter,
                "Files found in both Autorun and Plan directories. How do we proceed?",
                &labels,
            )?;
            match DumpSource::from_label(&answer) {
                Some(DumpSource::Autorun) => autorun,
                Some(DumpSource::Plan) => plan,
                Some(DumpSource::Both) | None => autorun.into_iter().chain(plan).collect(),
            }
        }
    };

    info!("Found {} FITS in input dir {}", frames.len(), input.display());
    Ok(frames)
}

fn scan_if_present(dir: &Path) -> Result<Vec<FileFrame>> {
    if dir.is_dir() {
        scan_directory(dir)
    } else {
        Ok(Vec::new())
    }
}
