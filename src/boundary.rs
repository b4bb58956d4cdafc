use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::VcsStep;

/// Non-fatal conditions noticed while publishing a draft.
/// These are reported to the user but never stop the publish.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The draft does not sit directly inside the configured drafts directory
    NotInDraftsDir { path: PathBuf, drafts_dir: String },
    /// The draft filename already carries a date stamp
    AlreadyDatePrefixed { file_name: String },
    /// No git work tree contains the draft
    NotInRepository { path: PathBuf, fallback: PathBuf },
    /// A version-control step failed and the remaining steps still ran
    StepFailedIgnored { step: VcsStep, code: Option<i32> },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NotInDraftsDir { path, drafts_dir } => write!(
                f,
                "'{}' is not inside a '{}' directory",
                path.display(),
                drafts_dir
            ),
            BoundaryWarning::AlreadyDatePrefixed { file_name } => write!(
                f,
                "'{}' already starts with a date; it will be stamped again",
                file_name
            ),
            BoundaryWarning::NotInRepository { path, fallback } => write!(
                f,
                "No git repository found for '{}'; running git in '{}'",
                path.display(),
                fallback.display()
            ),
            BoundaryWarning::StepFailedIgnored { step, code } => match code {
                Some(code) => write!(f, "git {} exited with code {}; continuing", step, code),
                None => write!(f, "git {} did not complete; continuing", step),
            },
        }
    }
}

/// Inspect a draft path for layout surprises before it is published.
pub fn check_draft(old_path: &Path, drafts_dir: &str) -> Vec<BoundaryWarning> {
    let mut warnings = Vec::new();

    let parent_name = old_path
        .parent()
        .and_then(|parent| parent.file_name())
        .and_then(|name| name.to_str());
    if parent_name != Some(drafts_dir) {
        warnings.push(BoundaryWarning::NotInDraftsDir {
            path: old_path.to_path_buf(),
            drafts_dir: drafts_dir.to_string(),
        });
    }

    if let Some(file_name) = old_path.file_name().and_then(|name| name.to_str()) {
        if has_date_prefix(file_name) {
            warnings.push(BoundaryWarning::AlreadyDatePrefixed {
                file_name: file_name.to_string(),
            });
        }
    }

    warnings
}

/// Whether a filename starts with a `YYYY-MM-DD-` stamp.
pub fn has_date_prefix(file_name: &str) -> bool {
    static DATE_PREFIX: OnceLock<Regex> = OnceLock::new();
    DATE_PREFIX
        .get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}-").expect("date prefix pattern is valid"))
        .is_match(file_name)
}
