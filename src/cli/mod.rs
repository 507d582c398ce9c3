pub mod orchestration;

pub use orchestration::{
    prepare_release, run_release_workflow, PreparedRelease, ReleaseWorkflowArgs, WorkflowResult,
};
