//! Domain logic - pure publishing rules independent of the filesystem and git

pub mod request;
pub mod step;

pub use request::{commit_message, published_path, validate_date_format, PublishRequest};
pub use step::{PublishOutcome, SequenceReport, StepResult, VcsStep};
