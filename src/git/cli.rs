use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::domain::{StepResult, VcsStep};
use crate::error::{PublishError, Result};
use crate::git::VersionControl;

/// Runs the system version-control executable.
///
/// Output streams are inherited so the client's own progress and error
/// messages reach the user unchanged.
pub struct GitCli {
    program: String,
}

impl GitCli {
    /// Create a client that runs `program` (usually `git`)
    pub fn new(program: impl Into<String>) -> Self {
        GitCli {
            program: program.into(),
        }
    }
}

impl VersionControl for GitCli {
    fn run(&self, step: VcsStep, args: &[OsString], work_dir: &Path) -> Result<StepResult> {
        tracing::debug!(
            step = %step,
            program = %self.program,
            work_dir = %work_dir.display(),
            "running version control step"
        );

        let status = Command::new(&self.program)
            .args(args)
            .current_dir(work_dir)
            .status()
            .map_err(|e| {
                PublishError::version_control(
                    step,
                    format!("failed to execute '{}': {}", self.program, e),
                )
            })?;

        if status.success() {
            Ok(StepResult::ok(step))
        } else {
            tracing::info!(step = %step, code = ?status.code(), "version control step failed");
            Ok(StepResult::failed(step, status.code()))
        }
    }
}
