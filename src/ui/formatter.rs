//! Pure formatting functions for CI-facing output.
//!
//! All display logic lives here, separated from the engine. Functions are
//! print-only; nothing in this module affects the computed decision.

use console::style;

use crate::analyzer::ReleaseDecision;
use crate::changelog::ChangelogDocument;
use crate::domain::TagPattern;
use crate::parser::{IgnoredCommit, ParseError};
use crate::policy::GateViolation;

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

/// Format and print a non-fatal warning.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// Print every malformed commit with its raw text, so CI logs show all
/// problems in one pass.
pub fn display_parse_errors(errors: &[ParseError]) {
    for error in errors {
        display_warning(&format!("unparsable commit message: {}", error));
        for line in error.raw.lines() {
            eprintln!("    {}", style(line).dim());
        }
    }
}

/// Print every gate rejection with the offending raw text.
pub fn display_gate_violations(violations: &[GateViolation]) {
    for violation in violations {
        display_warning(&violation.reason);
        for line in violation.raw.lines() {
            eprintln!("    {}", style(line).dim());
        }
    }
}

/// Summarize messages skipped by bypass prefixes.
pub fn display_ignored(ignored: &[IgnoredCommit]) {
    if !ignored.is_empty() {
        display_status(&format!(
            "Skipped {} non-conventional message(s) (merge/revert/[skip ci])",
            ignored.len()
        ));
    }
}

/// Display the release decision.
///
/// A NONE bump prints a do-not-tag notice; otherwise the version movement
/// and the tag the caller should create.
pub fn display_decision(decision: &ReleaseDecision, pattern: &TagPattern) {
    if decision.is_noop() {
        display_status(&format!(
            "No release-worthy changes; version stays at {} (do not tag)",
            decision.from
        ));
        return;
    }

    println!("\n{}", style("Proposed release:").bold());
    println!("  From: {}", style(&decision.from).red());
    println!(
        "  To:   {} ({} bump, {} commit(s))",
        style(&decision.to).green(),
        decision.bump,
        decision.triggering_commits.len()
    );
    println!("  Tag:  {}", pattern.format(&decision.to));
}

/// Print the changelog as Markdown.
pub fn display_changelog(changelog: &ChangelogDocument) {
    if !changelog.is_empty() {
        println!();
        print!("{}", changelog.to_markdown());
    }
}
