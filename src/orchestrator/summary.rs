use std::fmt;

/// The three phases of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    UntrackedScan,
    Extraction,
    Compatibility,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::UntrackedScan => write!(f, "Checking for untracked messages"),
            Stage::Extraction => write!(f, "Extracting default messages"),
            Stage::Compatibility => write!(f, "Checking compatibility of translation files"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Passed { detail: Option<String> },
    Failed,
    /// Not attempted because an earlier sub-task of the stage failed.
    Aborted,
}

/// Result of one sub-task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub name: String,
    pub outcome: TaskOutcome,
}

impl TaskReport {
    pub fn passed(name: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            name: name.into(),
            outcome: TaskOutcome::Passed { detail },
        }
    }

    pub fn failed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: TaskOutcome::Failed,
        }
    }

    pub fn aborted(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: TaskOutcome::Aborted,
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self.outcome, TaskOutcome::Passed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Passed,
    Failed,
    Skipped,
}

/// Result of one stage, with its sub-tasks in configured order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,
    pub skipped: bool,
    pub tasks: Vec<TaskReport>,
}

impl StageReport {
    pub fn new(stage: Stage, tasks: Vec<TaskReport>) -> Self {
        Self {
            stage,
            skipped: false,
            tasks,
        }
    }

    pub fn skipped(stage: Stage) -> Self {
        Self {
            stage,
            skipped: true,
            tasks: Vec::new(),
        }
    }

    pub fn status(&self) -> StageStatus {
        if self.skipped {
            StageStatus::Skipped
        } else if self.tasks.iter().all(TaskReport::is_passed) {
            StageStatus::Passed
        } else {
            StageStatus::Failed
        }
    }
}

/// What a run did, successful or not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub stages: Vec<StageReport>,
    /// True when there were no translation files and nothing ran.
    pub short_circuited: bool,
}

impl RunSummary {
    pub fn short_circuit() -> Self {
        Self {
            short_circuited: true,
            ..Default::default()
        }
    }

    pub fn stage(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == stage)
    }
}
