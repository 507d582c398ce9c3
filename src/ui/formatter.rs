//! Pure formatting functions for UI output.
//!
//! Everything the operator reads goes through here; diagnostics go through
//! `tracing` instead.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::{CategorizedCommits, CommitCategory};
use crate::error::CompensationFailure;

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

/// Print a bold section header preceded by a blank line.
pub fn display_header(message: &str) {
    println!("\n{}", style(message).bold());
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// One status line per category that has commits, in section order
pub fn found_categories_lines(commits: &CategorizedCommits) -> Vec<String> {
    commits
        .non_empty()
        .map(|(category, records)| {
            format!(
                "Found {} {} commit{}",
                records.len(),
                category_label(category),
                if records.len() == 1 { "" } else { "s" }
            )
        })
        .collect()
}

/// Report which kinds of changes were found since the last release.
pub fn display_found_categories(commits: &CategorizedCommits) {
    for line in found_categories_lines(commits) {
        display_status(&line);
    }
}

/// Print the rendered release notes between rules.
pub fn display_notes(notes: &str) {
    let rule = style("─".repeat(40)).dim();
    println!("{}", rule);
    print!("{}", notes);
    println!("{}", rule);
}

/// Tell the operator which rollback actions must be done by hand.
pub fn display_manual_cleanup(tag: &str, remote: &str, failures: &[CompensationFailure]) {
    eprintln!(
        "{} the following rollback actions failed:",
        style("Manual cleanup required:").red().bold()
    );
    for failure in failures {
        eprintln!("  - {}", failure);
        match failure.action {
            "delete-local-tag" => eprintln!("    run: {}", style(format!("git tag -d {}", tag)).cyan()),
            "delete-remote-tag" => eprintln!(
                "    run: {}",
                style(format!("git push {} :refs/tags/{}", remote, tag)).cyan()
            ),
            _ => {}
        }
    }
}

fn category_label(category: CommitCategory) -> &'static str {
    match category {
        CommitCategory::Major => "breaking",
        CommitCategory::Minor => "feature",
        CommitCategory::Patch => "fix",
        CommitCategory::Docs => "documentation",
        CommitCategory::Other => "other",
    }
}
