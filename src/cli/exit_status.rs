use std::process::ExitCode;

/// Exit status of a check run.
///
/// - `Success` (0): every stage passed
/// - `Failure` (1): invalid flags, or one or more sub-tasks failed
/// - `Error` (2): unhandled error (config load, runtime, panicked task)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every stage passed, or there was nothing to check.
    Success,
    /// Invalid flags, or one or more sub-tasks failed.
    Failure,
    /// Unhandled error outside the structured failure list.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
