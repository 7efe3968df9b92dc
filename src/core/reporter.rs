//! Shared error accumulator for a run.
//!
//! Every stage receives the same [`ErrorReporter`] and records expected,
//! user-facing failures ([`FailError`]) into it. The orchestrator inspects
//! it once at the end to decide how the run is reported.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// An expected failure that should be shown to the user as-is.
///
/// Anything that is not a `FailError` is treated as unexpected and is
/// never written into the reporter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FailError {
    message: String,
}

impl FailError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn is_fail_error(error: &anyhow::Error) -> bool {
    error.is::<FailError>()
}

/// One recorded failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// Name of the sub-task that failed, usually a path.
    pub context: String,
    pub message: String,
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error in {}\n{}", self.context, self.message)
    }
}

/// Append-only, thread-safe collection of [`ReportEntry`].
#[derive(Debug, Default)]
pub struct ErrorReporter {
    entries: Mutex<Vec<ReportEntry>>,
}

impl ErrorReporter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A handle that tags every report with `name`.
    pub fn with_context(self: &Arc<Self>, name: impl Into<String>) -> ReporterContext {
        ReporterContext {
            reporter: Arc::clone(self),
            name: name.into(),
        }
    }

    pub fn report(&self, context: impl Into<String>, message: impl fmt::Display) {
        let entry = ReportEntry {
            context: context.into(),
            message: message.to_string(),
        };
        self.lock().push(entry);
    }

    pub fn entries(&self) -> Vec<ReportEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// All entries as one message, separated by blank lines.
    pub fn aggregate(&self) -> String {
        self.lock()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ReportEntry>> {
        // Entries are plain data, a panic mid-push cannot leave them torn.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Reporter handle bound to one sub-task.
#[derive(Debug, Clone)]
pub struct ReporterContext {
    reporter: Arc<ErrorReporter>,
    name: String,
}

impl ReporterContext {
    /// Record `error` if it is a [`FailError`]. Returns whether it was recorded.
    pub fn report(&self, error: &anyhow::Error) -> bool {
        match error.downcast_ref::<FailError>() {
            Some(fail) => {
                self.reporter.report(self.name.clone(), fail.message());
                true
            }
            None => false,
        }
    }
}
