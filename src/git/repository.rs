use git2::{ErrorCode, Repository};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Find the work tree of the git repository containing `path`.
///
/// Walks up from `path` (or from its parent when `path` is a file) the way
/// `git` itself does.
///
/// # Returns
/// * `Ok(Some(dir))` - Root of the work tree
/// * `Ok(None)` - No repository found, or the repository is bare
/// * `Err` - If a repository was found but could not be opened
pub fn discover_work_tree(path: &Path) -> Result<Option<PathBuf>> {
    let start = if path.is_file() {
        path.parent().unwrap_or(path)
    } else {
        path
    };
    let start = if start.as_os_str().is_empty() {
        Path::new(".")
    } else {
        start
    };

    match Repository::discover(start) {
        Ok(repo) => Ok(repo.workdir().map(Path::to_path_buf)),
        Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
