//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic. Styling goes through
//! `console`, which drops the escape codes when the stream is not a terminal.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::{PublishOutcome, SequenceReport};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print the commit message on its own line.
///
/// Left unstyled: scripts wrapping the tool read this line verbatim.
pub fn display_commit_message(message: &str) {
    println!("{}", message);
}

/// Display what a dry run would do.
///
/// # Arguments
/// * `from` / `to` - Source and destination of the rename
/// * `commands` - Rendered version-control invocations, in order
pub fn display_plan(from: &str, to: &str, commands: &[String]) {
    println!("\n{}", style("Dry run - nothing will be changed").bold());
    println!("  Move: {}", style(from).red());
    println!("  To:   {}", style(to).green());
    for (i, command) in commands.iter().enumerate() {
        println!("  Step {}: {}", i + 1, style(command).cyan());
    }
}

/// Summarize the version-control sequence once it has finished.
pub fn display_outcome(report: &SequenceReport, post: &str) {
    match report.outcome() {
        PublishOutcome::Published => {
            display_success(&format!("Published {}", post));
        }
        outcome => {
            let failed: Vec<&str> = report.failures().map(|r| r.step.name()).collect();
            display_error(&format!(
                "Publishing {} incomplete ({}); failed steps: {}",
                post,
                outcome,
                failed.join(", ")
            ));
        }
    }
}
