use std::borrow::Cow;
use std::ffi::OsString;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use chrono::format::StrftimeItems;
use chrono::NaiveDate;

use crate::config::Config;
use crate::error::{PublishError, Result};

/// A draft to be promoted to a post.
///
/// Everything except `old_path` is derived. The date is passed in rather than
/// read from the system clock so the same draft always maps to the same
/// destination for a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub old_path: PathBuf,
    pub new_path: PathBuf,
    pub commit_message: String,
}

impl PublishRequest {
    /// Build a request using the layout and message settings from `config`.
    pub fn new(old_path: impl Into<PathBuf>, today: NaiveDate, config: &Config) -> Result<Self> {
        let old_path = old_path.into();
        let new_path = published_path(
            &old_path,
            today,
            &config.layout.posts_dir,
            &config.layout.date_format,
        )?;
        let commit_message = commit_message(&new_path, &config.git.commit_message_prefix)?;

        Ok(PublishRequest {
            old_path,
            new_path,
            commit_message,
        })
    }

    /// Filename of the published post, date stamp included
    pub fn post_file_name(&self) -> Cow<'_, str> {
        self.new_path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default()
    }
}

/// Compute the destination of a draft.
///
/// The result is `<draft dir>/../<posts_dir>/<date><file name>`. The `..`
/// segment is kept literally, not normalized, so the path reads the same way
/// it would be typed by hand.
pub fn published_path(
    old_path: &Path,
    today: NaiveDate,
    posts_dir: &str,
    date_format: &str,
) -> Result<PathBuf> {
    let file_name = old_path.file_name().ok_or_else(|| {
        PublishError::invalid_path(format!("'{}' does not name a file", old_path.display()))
    })?;

    let mut stamped = OsString::from(date_prefix(today, date_format)?);
    stamped.push(file_name);

    let draft_dir = old_path.parent().unwrap_or_else(|| Path::new(""));
    Ok(draft_dir.join("..").join(posts_dir).join(stamped))
}

/// Render the filename prefix for `date`.
///
/// Fails for formats chrono cannot render for a plain date (time or zone
/// specifiers included) and for prefixes that would add a path segment.
pub fn date_prefix(date: NaiveDate, date_format: &str) -> Result<String> {
    let mut prefix = String::new();
    write!(
        prefix,
        "{}",
        date.format_with_items(StrftimeItems::new(date_format))
    )
    .map_err(|_| {
        PublishError::config(format!("'{}' is not a valid date format", date_format))
    })?;

    if prefix.contains('/') || prefix.contains('\\') {
        return Err(PublishError::config(format!(
            "date format '{}' must not produce a path separator",
            date_format
        )));
    }
    Ok(prefix)
}

/// Reject date formats that [date_prefix] cannot render.
pub fn validate_date_format(date_format: &str) -> Result<()> {
    date_prefix(NaiveDate::default(), date_format).map(|_| ())
}

/// Build the commit message from the published path's final segment.
pub fn commit_message(new_path: &Path, prefix: &str) -> Result<String> {
    let file_name = new_path.file_name().ok_or_else(|| {
        PublishError::invalid_path(format!("'{}' has no file name", new_path.display()))
    })?;

    Ok(format!("{}{}", prefix, file_name.to_string_lossy()))
}
