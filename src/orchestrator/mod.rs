//! Stage runner for an i18n check.
//!
//! A run executes three stages strictly in order:
//!
//! ```text
//! untracked scan (sequential, non-fatal)
//!     ↓
//! default message extraction (sequential, first failure aborts the stage)
//!     ↓
//! compatibility checks (concurrent, one task per translation file)
//! ```
//!
//! Every expected failure lands in the shared [`ErrorReporter`]; every
//! failure of any kind is also returned in [`RunError::Tasks`] so nothing is
//! swallowed. [`Disposition`] turns the result into what the user sees.

mod disposition;
mod summary;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, instrument};

pub use disposition::Disposition;
pub use summary::{RunSummary, Stage, StageReport, StageStatus, TaskOutcome, TaskReport};

use crate::config::I18nConfig;
use crate::core::{
    Collaborators, ErrorReporter, IntegrateOptions, IntegrationReport, MessageCatalog,
};
use crate::flags::RunFlags;
use crate::utils::resolve_path;

/// A failed sub-task.
#[derive(Debug, thiserror::Error)]
#[error("{task}: {error:#}")]
pub struct TaskError {
    pub stage: Stage,
    pub task: String,
    pub error: anyhow::Error,
    /// Whether the error was recorded in the reporter.
    pub reported: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// One or more sub-tasks failed; the summary shows which.
    #[error("{} i18n task(s) failed", .errors.len())]
    Tasks {
        errors: Vec<TaskError>,
        summary: RunSummary,
    },
    #[error(transparent)]
    Unhandled(anyhow::Error),
}

pub struct Orchestrator {
    flags: RunFlags,
    config: Arc<I18nConfig>,
    collaborators: Collaborators,
    reporter: Arc<ErrorReporter>,
}

impl Orchestrator {
    pub fn new(flags: RunFlags, config: I18nConfig, collaborators: Collaborators) -> Self {
        Self {
            flags,
            config: Arc::new(config),
            collaborators,
            reporter: ErrorReporter::new(),
        }
    }

    pub fn reporter(&self) -> &Arc<ErrorReporter> {
        &self.reporter
    }

    #[instrument(skip_all, fields(translations = self.config.translations.len(), fix = self.flags.fix()))]
    pub async fn run(&self) -> Result<RunSummary, RunError> {
        if self.config.translations.is_empty() {
            debug!("no translation files configured, nothing to check");
            return Ok(RunSummary::short_circuit());
        }

        let mut errors = Vec::new();
        let mut stages = Vec::with_capacity(3);

        if self.flags.ignore_untracked() {
            stages.push(StageReport::skipped(Stage::UntrackedScan));
        } else {
            stages.push(self.scan_untracked(&mut errors).await);
        }

        let mut catalog = MessageCatalog::new();
        let (extraction, namespaces) = self.extract_defaults(&mut catalog, &mut errors).await;
        stages.push(extraction);

        let compatibility = self
            .check_compatibility(Arc::new(catalog), namespaces, &mut errors)
            .await
            .map_err(RunError::Unhandled)?;
        stages.push(compatibility);

        let summary = RunSummary {
            stages,
            short_circuited: false,
        };
        if errors.is_empty() {
            Ok(summary)
        } else {
            Err(RunError::Tasks { errors, summary })
        }
    }

    fn source_paths(&self) -> Vec<PathBuf> {
        match self.flags.path() {
            Some(path) => vec![resolve_path(&self.config.root, path)],
            None => self.config.source_roots.clone(),
        }
    }

    /// Record a failure: expected ones go to the reporter, all go to `errors`.
    fn record(&self, stage: Stage, task: &str, error: anyhow::Error, errors: &mut Vec<TaskError>) {
        let reported = self.reporter.with_context(task).report(&error);
        errors.push(TaskError {
            stage,
            task: task.to_string(),
            error,
            reported,
        });
    }

    async fn scan_untracked(&self, errors: &mut Vec<TaskError>) -> StageReport {
        let mut tasks = Vec::new();
        for root in self.source_paths() {
            let name = self.config.display(&root);
            debug!(root = %name, "scanning for untracked messages");
            match self.collaborators.scanner.scan(&root, &self.config).await {
                Ok(()) => tasks.push(TaskReport::passed(name, None)),
                Err(error) => {
                    self.record(Stage::UntrackedScan, &name, error, errors);
                    tasks.push(TaskReport::failed(name));
                }
            }
        }
        StageReport::new(Stage::UntrackedScan, tasks)
    }

    async fn extract_defaults(
        &self,
        catalog: &mut MessageCatalog,
        errors: &mut Vec<TaskError>,
    ) -> (StageReport, Vec<String>) {
        let extractor = &self.collaborators.extractor;
        let filter = self
            .flags
            .path()
            .map(|p| resolve_path(&self.config.root, p));
        let plan = extractor.plan(filter.as_deref(), &self.config);

        let mut tasks = Vec::with_capacity(plan.len());
        let mut aborted = false;
        for task in &plan {
            if aborted {
                tasks.push(TaskReport::aborted(&task.namespace));
                continue;
            }
            let before = catalog.len();
            match extractor.extract(task, &self.config, catalog).await {
                Ok(()) => {
                    let added = catalog.len() - before;
                    tasks.push(TaskReport::passed(
                        &task.namespace,
                        Some(format!("{} message(s)", added)),
                    ));
                }
                Err(error) => {
                    self.record(Stage::Extraction, &task.namespace, error, errors);
                    tasks.push(TaskReport::failed(&task.namespace));
                    aborted = true;
                }
            }
        }
        // Only fully extracted namespaces are compared; translations under
        // failed or aborted ones are left untouched.
        let namespaces = tasks
            .iter()
            .filter(|t| t.is_passed())
            .map(|t| t.name.clone())
            .collect();
        (StageReport::new(Stage::Extraction, tasks), namespaces)
    }

    async fn check_compatibility(
        &self,
        catalog: Arc<MessageCatalog>,
        namespaces: Vec<String>,
        errors: &mut Vec<TaskError>,
    ) -> anyhow::Result<StageReport> {
        let translations = &self.config.translations;
        let mut set = JoinSet::new();

        for (index, path) in translations.iter().enumerate() {
            let options = IntegrateOptions {
                source_path: path.clone(),
                target_path: self.flags.fix().then(|| path.clone()),
                dry_run: !self.flags.fix(),
                ignore_incompatible: self.flags.tolerate_incompatible(),
                ignore_unused: self.flags.tolerate_unused(),
                ignore_missing: self.flags.tolerate_missing(),
                namespaces: namespaces.clone(),
                config: Arc::clone(&self.config),
            };
            let integrator = Arc::clone(&self.collaborators.integrator);
            let catalog = Arc::clone(&catalog);
            let context = self.reporter.with_context(self.config.display(path));

            set.spawn(async move {
                let result = integrator
                    .integrate(&catalog, options)
                    .await
                    .map_err(|error| {
                        let reported = context.report(&error);
                        (error, reported)
                    });
                (index, result)
            });
        }

        let mut results: Vec<Option<Result<IntegrationReport, (anyhow::Error, bool)>>> =
            translations.iter().map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            let (index, result) = joined
                .map_err(|err| anyhow::anyhow!("compatibility check task failed: {}", err))?;
            results[index] = Some(result);
        }

        let mut tasks = Vec::with_capacity(translations.len());
        for (path, result) in translations.iter().zip(results) {
            let name = self.config.display(path);
            match result {
                Some(Ok(report)) => {
                    let detail = match &report.written {
                        Some(_) => format!("{} translation(s), file updated", report.translated),
                        None => format!("{} translation(s)", report.translated),
                    };
                    tasks.push(TaskReport::passed(name, Some(detail)));
                }
                Some(Err((error, reported))) => {
                    errors.push(TaskError {
                        stage: Stage::Compatibility,
                        task: name.clone(),
                        error,
                        reported,
                    });
                    tasks.push(TaskReport::failed(name));
                }
                None => anyhow::bail!("compatibility check for {} never completed", name),
            }
        }
        Ok(StageReport::new(Stage::Compatibility, tasks))
    }
}
