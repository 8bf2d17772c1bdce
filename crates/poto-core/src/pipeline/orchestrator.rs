use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{PotoError, Result};
use crate::project::ProjectDocument;
use crate::prompt::Prompter;

use super::dispatch::dispatch_project;
use super::plan::plan_project;
use super::types::{NoOpReporter, PrepareOutcome, PrepareRequest, ProgressReporter, ProjectPlan};

/// Make sure the destination may be used, asking the operator when needed.
/// Nothing is created here: the directory appears at dispatch.
fn check_project_directory(request: &PrepareRequest, prompter: &mut dyn Prompter) -> Result<()> {
    let dir = &request.project_dir;
    if dir.exists() && !dir.is_dir() {
        return Err(PotoError::DirectoryState(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    if !dir.exists() {
        let create = prompter.confirm(&format!(
            "Directory {} does not exist. Do you want to create it?",
            dir.display()
        ))?;
        if !create {
            return Err(PotoError::DirectoryState(format!(
                "{} does not exist",
                dir.display()
            )));
        }
        return Ok(());
    }

    let document = ProjectDocument::document_path(dir);
    if document.exists() {
        let overwrite = prompter.confirm(&format!(
            "{} already exists. Do you want to overwrite it?",
            document.display()
        ))?;
        if !overwrite {
            return Err(PotoError::DirectoryState(format!(
                "{} already holds a project",
                dir.display()
            )));
        }
    }
    Ok(())
}

/// Run the prepare command with a thread-safe progress reporter.
///
/// Everything up to `preview` and the final confirmation only reads the
/// inputs. The project directory is touched after the operator agrees.
pub fn prepare_project_reported<F>(
    request: &PrepareRequest,
    prompter: &mut dyn Prompter,
    reporter: Arc<dyn ProgressReporter>,
    preview: F,
) -> Result<PrepareOutcome>
where
    F: FnOnce(&ProjectPlan),
{
    check_project_directory(request, prompter)?;

    let plan = plan_project(request, prompter, reporter.as_ref())?;
    info!(
        layer_sets = plan.layer_sets.len(),
        warnings = plan.warnings.len(),
        "Preview before dispatching"
    );
    preview(&plan);

    if !prompter.confirm("Do you want to proceed with the dispatch?")? {
        warn!("Aborted");
        return Ok(PrepareOutcome::Declined);
    }

    let document = ProjectDocument::new(plan.layer_sets);
    let (document_path, stats) = dispatch_project(&document, &plan.project_dir, reporter.as_ref())?;
    Ok(PrepareOutcome::Dispatched {
        document_path,
        stats,
    })
}

/// Run the prepare command without progress reporting.
pub fn prepare_project<F>(
    request: &PrepareRequest,
    prompter: &mut dyn Prompter,
    preview: F,
) -> Result<PrepareOutcome>
where
    F: FnOnce(&ProjectPlan),
{
    prepare_project_reported(request, prompter, Arc::new(NoOpReporter), preview)
}
