//! Main workflow orchestration logic
//!
//! This module contains the publish workflow itself: rename the draft, then
//! drive the version-control client through stage, commit, pull and push.
//! It is independent of CLI argument parsing so tests can call it directly
//! with a fixed date, a scratch directory and a mock client.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::boundary::{self, BoundaryWarning};
use crate::config::Config;
use crate::domain::{PublishOutcome, PublishRequest, SequenceReport, VcsStep};
use crate::error::{PublishError, Result};
use crate::git::{self, VersionControl};
use crate::ui;

/// Arguments for the publish workflow
///
/// Everything the workflow would otherwise read from ambient process state
/// (clock, current directory) is passed in explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishWorkflowArgs {
    /// Draft path as given by the user
    pub draft: PathBuf,

    /// Date stamped onto the published filename
    pub today: NaiveDate,

    /// Directory relative paths are resolved against
    pub base_dir: PathBuf,

    /// Stop at the first failed step instead of running the rest
    pub stop_on_failure: bool,

    /// Preview mode - don't rename or invoke the client
    pub dry_run: bool,
}

/// Result of a publish workflow that got past the rename
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The request with its derived destination and commit message
    pub request: PublishRequest,

    /// Steps that ran, in order (empty for a dry run)
    pub report: SequenceReport,

    /// Directory the client ran (or would run) in
    pub work_dir: PathBuf,

    /// Path handed to the stage step
    pub stage_path: PathBuf,

    /// Non-fatal warnings raised along the way
    pub warnings: Vec<BoundaryWarning>,

    pub dry_run: bool,
}

impl WorkflowResult {
    pub fn outcome(&self) -> PublishOutcome {
        self.report.outcome()
    }
}

/// Main publish workflow
///
/// 1. Derive the destination path and commit message
/// 2. Move the draft into the posts directory
/// 3. Print the commit message
/// 4. Stage, commit, pull and push through `vcs`
///
/// A failed rename is returned as `Err` and no version-control step runs.
/// Every step runs once even when an earlier one fails, unless
/// `stop_on_failure` is set. Step failures are reported through
/// [WorkflowResult::report], not as `Err`.
pub fn run_publish_workflow(
    args: &PublishWorkflowArgs,
    config: &Config,
    vcs: &dyn VersionControl,
) -> Result<WorkflowResult> {
    let request = PublishRequest::new(&args.draft, args.today, config)?;
    tracing::debug!(
        from = %request.old_path.display(),
        to = %request.new_path.display(),
        "derived publish request"
    );

    let mut warnings = boundary::check_draft(&request.old_path, &config.layout.drafts_dir);
    for warning in &warnings {
        ui::display_boundary_warning(warning);
    }

    let source = args.base_dir.join(&request.old_path);
    let destination = args.base_dir.join(&request.new_path);

    let metadata = fs::metadata(&source).map_err(|e| rename_error(&request, e))?;
    if metadata.is_dir() {
        return Err(PublishError::invalid_path(format!(
            "'{}' is a directory",
            request.old_path.display()
        )));
    }
    if destination.exists() {
        return Err(PublishError::DestinationExists(request.new_path.clone()));
    }

    // git resolves relative paths against its own work dir, which may not be base_dir
    let stage_path = absolute_destination(&destination);

    if args.dry_run {
        let (work_dir, warning) = resolve_work_dir(&source, &args.base_dir);
        if let Some(warning) = warning {
            ui::display_boundary_warning(&warning);
            warnings.push(warning);
        }

        let commands: Vec<String> = VcsStep::SEQUENCE
            .iter()
            .map(|&step| {
                let step_args = git::step_args(step, &stage_path, &request.commit_message);
                git::display_command(&config.git.program, &step_args)
            })
            .collect();
        ui::display_plan(
            &request.old_path.display().to_string(),
            &request.new_path.display().to_string(),
            &commands,
        );

        return Ok(WorkflowResult {
            request,
            report: SequenceReport::new(),
            work_dir,
            stage_path,
            warnings,
            dry_run: true,
        });
    }

    fs::rename(&source, &destination).map_err(|e| rename_error(&request, e))?;
    tracing::info!(to = %destination.display(), "moved draft");

    let (work_dir, warning) = resolve_work_dir(&destination, &args.base_dir);
    if let Some(warning) = warning {
        ui::display_boundary_warning(&warning);
        warnings.push(warning);
    }

    ui::display_commit_message(&request.commit_message);

    let mut report = SequenceReport::new();
    for step in VcsStep::SEQUENCE {
        let step_args = git::step_args(step, &stage_path, &request.commit_message);
        ui::display_status(&git::display_command(&config.git.program, &step_args));
        let result = vcs.run(step, &step_args, &work_dir)?;
        let failed = !result.success;
        let code = result.code;
        report.record(result);

        if failed {
            if args.stop_on_failure {
                break;
            }
            let warning = BoundaryWarning::StepFailedIgnored { step, code };
            ui::display_boundary_warning(&warning);
            warnings.push(warning);
        }
    }

    Ok(WorkflowResult {
        request,
        report,
        work_dir,
        stage_path,
        warnings,
        dry_run: false,
    })
}

/// Absolute form of `destination`, resolved through its parent so the same
/// path comes out before and after the rename.
fn absolute_destination(destination: &Path) -> PathBuf {
    match (destination.parent(), destination.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent)
            .map(|dir| dir.join(name))
            .unwrap_or_else(|_| destination.to_path_buf()),
        _ => destination.to_path_buf(),
    }
}

fn rename_error(request: &PublishRequest, source: std::io::Error) -> PublishError {
    PublishError::Rename {
        from: request.old_path.clone(),
        to: request.new_path.clone(),
        source,
    }
}

/// Pick the directory the client runs in: the work tree containing `near`,
/// or `fallback` with a warning when there is none.
pub fn resolve_work_dir(near: &Path, fallback: &Path) -> (PathBuf, Option<BoundaryWarning>) {
    let start = near.parent().unwrap_or(near);
    match git::discover_work_tree(start) {
        Ok(Some(work_tree)) => (work_tree, None),
        Ok(None) => (
            fallback.to_path_buf(),
            Some(BoundaryWarning::NotInRepository {
                path: near.to_path_buf(),
                fallback: fallback.to_path_buf(),
            }),
        ),
        Err(e) => {
            tracing::debug!(error = %e, "work tree discovery failed");
            (
                fallback.to_path_buf(),
                Some(BoundaryWarning::NotInRepository {
                    path: near.to_path_buf(),
                    fallback: fallback.to_path_buf(),
                }),
            )
        }
    }
}
