//! Version-control abstraction layer
//!
//! Publishing drives an external version-control client through four
//! invocations. The [VersionControl] trait is the seam between the publish
//! workflow and that client:
//!
//! - [cli::GitCli]: runs the real `git` executable as a child process
//! - [mock::MockVersionControl]: records invocations for tests
//!
//! [repository] uses `git2` only to locate the work tree the client should
//! run in; all mutations go through the external client so that the user's
//! credentials, hooks and merge configuration apply unchanged.

pub mod cli;
pub mod mock;
pub mod repository;

pub use cli::GitCli;
pub use mock::{MockCall, MockVersionControl};
pub use repository::discover_work_tree;

use std::ffi::OsString;
use std::path::Path;

use crate::domain::{StepResult, VcsStep};
use crate::error::Result;

/// A client able to run one publish step at a time.
///
/// ## Error Handling
///
/// A step that runs and exits non-zero is *not* an error: it is reported as a
/// failed [StepResult] so the caller decides whether to continue. `Err` is
/// reserved for a client that could not be started at all.
pub trait VersionControl: Send + Sync {
    /// Run `step` with the given client arguments inside `work_dir` and wait
    /// for it to exit.
    fn run(&self, step: VcsStep, args: &[OsString], work_dir: &Path) -> Result<StepResult>;
}

/// Client arguments for a publish step.
///
/// `path` is only used by [VcsStep::Stage], `message` only by [VcsStep::Commit].
pub fn step_args(step: VcsStep, path: &Path, message: &str) -> Vec<OsString> {
    match step {
        VcsStep::Stage => vec!["add".into(), path.as_os_str().to_os_string()],
        VcsStep::Commit => vec!["commit".into(), "-m".into(), message.into()],
        VcsStep::Pull => vec!["pull".into()],
        VcsStep::Push => vec!["push".into()],
    }
}

/// Render a step as a shell-like command line for display.
pub fn display_command(program: &str, args: &[OsString]) -> String {
    let mut line = program.to_string();
    for arg in args {
        let arg = arg.to_string_lossy();
        line.push(' ');
        if arg.contains(char::is_whitespace) || arg.is_empty() {
            line.push_str(&format!("\"{}\"", arg));
        } else {
            line.push_str(&arg);
        }
    }
    line
}
