//! Report formatting and printing utilities.
//!
//! Stage progress goes to stdout, failures to stderr. Kept apart from the
//! orchestrator so the crate can be driven as a library.

use std::io::{self, Write};

use colored::Colorize;
use tracing::error;

use crate::orchestrator::{Disposition, RunSummary, StageReport, StageStatus, TaskOutcome};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Mark for stages and sub-tasks that did not run.
pub const SKIPPED_MARK: &str = "-";

/// Print every stage with its sub-tasks.
pub fn print_summary(summary: &RunSummary) {
    print_summary_to(summary, &mut io::stdout().lock());
}

pub fn print_summary_to<W: Write>(summary: &RunSummary, writer: &mut W) {
    if summary.short_circuited {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "No translation files configured - nothing to check".green()
        );
        return;
    }

    for stage in &summary.stages {
        print_stage(stage, writer);
    }
}

fn print_stage<W: Write>(stage: &StageReport, writer: &mut W) {
    let title = stage.stage.to_string();
    match stage.status() {
        StageStatus::Passed => {
            let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), title);
        }
        StageStatus::Failed => {
            let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), title.bold());
        }
        StageStatus::Skipped => {
            let _ = writeln!(
                writer,
                "{} {} {}",
                SKIPPED_MARK.dimmed(),
                title.dimmed(),
                "[skipped]".dimmed()
            );
            return;
        }
    }

    for task in &stage.tasks {
        let line = match &task.outcome {
            TaskOutcome::Passed { detail: Some(detail) } => format!(
                "{} {} {}",
                SUCCESS_MARK.green(),
                task.name,
                format!("({})", detail).dimmed()
            ),
            TaskOutcome::Passed { detail: None } => {
                format!("{} {}", SUCCESS_MARK.green(), task.name)
            }
            TaskOutcome::Failed => format!("{} {}", FAILURE_MARK.red(), task.name.red()),
            TaskOutcome::Aborted => format!(
                "{} {} {}",
                SKIPPED_MARK.dimmed(),
                task.name.dimmed(),
                "[aborted]".dimmed()
            ),
        };
        let _ = writeln!(writer, "    {}", line);
    }
}

/// Print the final outcome of a run.
pub fn print_disposition(disposition: &Disposition) {
    print_disposition_to(disposition, &mut io::stderr().lock());
}

pub fn print_disposition_to<W: Write>(disposition: &Disposition, writer: &mut W) {
    match disposition {
        Disposition::Success => {}
        Disposition::ReportedFailure {
            message,
            unreported,
        } => {
            let _ = writeln!(writer);
            let _ = writeln!(writer, "{}", " I18N ERROR ".on_red().white().bold());
            let _ = writeln!(writer, "{}", message);
            print_errors(unreported, writer);
        }
        Disposition::PartialFailure { errors } => print_errors(errors, writer),
        Disposition::Unhandled { error: err } => {
            error!("unhandled exception: {}", err);
            let _ = writeln!(
                writer,
                "{} {}",
                "Unhandled exception!".bold().red(),
                err
            );
        }
    }
}

fn print_errors<W: Write>(errors: &[String], writer: &mut W) {
    for err in errors {
        error!("{}", err);
        let _ = writeln!(writer, "{} {}", "error:".bold().red(), err);
    }
}
