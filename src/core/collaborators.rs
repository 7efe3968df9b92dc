//! Seams between the orchestrator and the work it schedules.
//!
//! The orchestrator only knows these traits. The built-in implementations
//! live next to this module; tests substitute their own.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::catalog::MessageCatalog;
use super::defaults::RegexExtractor;
use super::integrate::JsonLocaleIntegrator;
use super::placeholders::placeholders;
use super::untracked::SourceScanner;
use crate::config::I18nConfig;

/// One extraction sub-task: every directory of a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionTask {
    pub namespace: String,
    pub paths: Vec<PathBuf>,
}

/// Options for integrating one translation file.
#[derive(Debug, Clone)]
pub struct IntegrateOptions {
    pub source_path: PathBuf,
    /// File to write the merged translations to.
    pub target_path: Option<PathBuf>,
    pub dry_run: bool,
    pub ignore_incompatible: bool,
    pub ignore_unused: bool,
    pub ignore_missing: bool,
    /// Namespaces that were extracted; translations outside them are left alone.
    pub namespaces: Vec<String>,
    pub config: Arc<I18nConfig>,
}

impl IntegrateOptions {
    pub fn in_scope(&self, id: &str) -> bool {
        self.namespaces.iter().any(|ns| {
            id.strip_prefix(ns.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
        })
    }
}

/// Translation whose placeholders do not match the default message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incompatibility {
    pub id: String,
    pub expected: Vec<String>,
    pub found: Vec<String>,
}

impl Incompatibility {
    pub fn check(id: &str, default_message: &str, translation: &str) -> Option<Self> {
        let expected = placeholders(default_message);
        let found = placeholders(translation);
        (expected != found).then(|| Self {
            id: id.to_string(),
            expected: expected.into_iter().collect(),
            found: found.into_iter().collect(),
        })
    }
}

/// Outcome of a successful integration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationReport {
    /// Compatible translations kept.
    pub translated: usize,
    pub unused: Vec<String>,
    pub missing: Vec<String>,
    pub incompatible: Vec<Incompatibility>,
    /// Set when the file was rewritten.
    pub written: Option<PathBuf>,
}

#[async_trait]
pub trait UntrackedScanner: Send + Sync {
    /// Fail when `root` holds i18n labels outside every configured namespace.
    async fn scan(&self, root: &Path, config: &I18nConfig) -> Result<()>;
}

#[async_trait]
pub trait DefaultMessageExtractor: Send + Sync {
    /// Ordered sub-tasks, optionally restricted to namespaces overlapping `path`.
    fn plan(&self, path: Option<&Path>, config: &I18nConfig) -> Vec<ExtractionTask>;

    async fn extract(
        &self,
        task: &ExtractionTask,
        config: &I18nConfig,
        catalog: &mut MessageCatalog,
    ) -> Result<()>;
}

#[async_trait]
pub trait LocaleIntegrator: Send + Sync {
    async fn integrate(
        &self,
        catalog: &MessageCatalog,
        options: IntegrateOptions,
    ) -> Result<IntegrationReport>;
}

/// The set of collaborators a run uses.
#[derive(Clone)]
pub struct Collaborators {
    pub scanner: Arc<dyn UntrackedScanner>,
    pub extractor: Arc<dyn DefaultMessageExtractor>,
    pub integrator: Arc<dyn LocaleIntegrator>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            scanner: Arc::new(SourceScanner),
            extractor: Arc::new(RegexExtractor),
            integrator: Arc::new(JsonLocaleIntegrator),
        }
    }
}
