use super::{RunError, RunSummary};
use crate::core::ErrorReporter;

/// How the end of a run is presented to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    Success,
    /// Expected failures, shown once as the reporter's aggregated message,
    /// followed by any errors the reporter never saw.
    ReportedFailure {
        message: String,
        unreported: Vec<String>,
    },
    /// Failures that never reached the reporter, logged one by one.
    PartialFailure { errors: Vec<String> },
    /// Anything without a structured error list; terminates the process.
    Unhandled { error: String },
}

impl Disposition {
    pub fn from_run(result: &Result<RunSummary, RunError>, reporter: &ErrorReporter) -> Self {
        match result {
            Ok(_) => Disposition::Success,
            Err(RunError::Tasks { errors, .. }) if !errors.is_empty() => {
                if reporter.is_empty() {
                    Disposition::PartialFailure {
                        errors: errors.iter().map(ToString::to_string).collect(),
                    }
                } else {
                    Disposition::ReportedFailure {
                        message: reporter.aggregate(),
                        unreported: errors
                            .iter()
                            .filter(|e| !e.reported)
                            .map(ToString::to_string)
                            .collect(),
                    }
                }
            }
            Err(error) => Disposition::Unhandled {
                error: format!("{:#}", error),
            },
        }
    }
}
