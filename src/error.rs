use std::path::PathBuf;

use thiserror::Error;

use crate::domain::VcsStep;

/// Unified error type for publish operations
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot move '{}' to '{}': {source}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("Invalid draft path: {0}")]
    InvalidPath(String),

    #[error("Version control step '{step}' failed: {message}")]
    VersionControl { step: VcsStep, message: String },
}

/// Convenience type alias for Results in publish-post
pub type Result<T> = std::result::Result<T, PublishError>;

impl PublishError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        PublishError::Config(msg.into())
    }

    /// Create an invalid path error with context
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        PublishError::InvalidPath(msg.into())
    }

    /// Create a version control error for a specific step
    pub fn version_control(step: VcsStep, msg: impl Into<String>) -> Self {
        PublishError::VersionControl {
            step,
            message: msg.into(),
        }
    }

    /// Whether this error happened before or during the rename, i.e. the
    /// filesystem was left untouched by the version-control sequence.
    pub fn is_filesystem(&self) -> bool {
        matches!(
            self,
            PublishError::Rename { .. }
                | PublishError::DestinationExists(_)
                | PublishError::InvalidPath(_)
        )
    }
}
