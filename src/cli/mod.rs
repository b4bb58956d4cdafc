//! Command workflows, decoupled from `clap` parsing in `main.rs`

pub mod orchestration;

pub use orchestration::{run_publish_workflow, PublishWorkflowArgs, WorkflowResult};
