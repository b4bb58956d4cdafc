//! User interface module - terminal output for the publish command.
//!
//! `formatter` holds the printing functions; they are re-exported here so
//! callers write `ui::display_status(..)`.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_commit_message, display_error, display_outcome,
    display_plan, display_status, display_success,
};
