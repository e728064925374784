//! Terminal output for the release run.
//!
//! Status and progress go to stdout, errors and blocking reasons to stderr.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::{ChangelogEntry, ReleaseDecision, Version};

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

/// Print a non-fatal warning.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("WARNING:").yellow().bold(), warning);
}

/// Print every reason the release was stopped, in the order found.
pub fn display_blocking_reasons(decision: &ReleaseDecision) {
    eprintln!("\n{}", style("Repository is not ready for release").red().bold());
    for reason in &decision.blocking_reasons {
        eprintln!("  {} {}", style("✗").red(), reason);
    }
}

/// Show the changelog that will be published for `version`.
///
/// Lists up to 10 entries, then a count of the rest.
pub fn display_changelog(version: Version, entries: &[ChangelogEntry]) {
    println!(
        "\n{}",
        style(format!("Changelog for {}", version.tag_name())).bold()
    );

    for entry in entries.iter().take(10) {
        println!("  {} {}", style(&entry.short_id).dim(), entry.summary);
    }

    if entries.len() > 10 {
        println!("  ... and {} more commits", entries.len() - 10);
    }
}
