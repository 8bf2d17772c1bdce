mod dispatch;
mod orchestrator;
mod plan;
mod types;

pub use dispatch::dispatch_project;
pub use orchestrator::{prepare_project, prepare_project_reported};
pub use plan::{attach_calibration, plan_project};
pub use types::{
    DispatchStats, NoOpReporter, PrepareOutcome, PrepareRequest, PrepareStage, ProgressReporter,
    ProjectPlan,
};
