use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use rayon::prelude::*;

use super::catalog::{MessageCatalog, MessageDescriptor};
use super::collaborators::{DefaultMessageExtractor, ExtractionTask};
use super::labels::{Label, extract_labels};
use super::reporter::FailError;
use super::sources::collect_source_files;
use crate::config::I18nConfig;

/// Extracts default messages with [`extract_labels`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexExtractor;

#[async_trait]
impl DefaultMessageExtractor for RegexExtractor {
    fn plan(&self, path: Option<&Path>, config: &I18nConfig) -> Vec<ExtractionTask> {
        config
            .namespaces
            .iter()
            .filter_map(|ns| {
                let paths: Vec<PathBuf> = ns
                    .paths
                    .iter()
                    .filter(|p| path.is_none_or(|filter| overlaps(p, filter)))
                    .cloned()
                    .collect();
                (!paths.is_empty()).then(|| ExtractionTask {
                    namespace: ns.name.clone(),
                    paths,
                })
            })
            .collect()
    }

    async fn extract(
        &self,
        task: &ExtractionTask,
        config: &I18nConfig,
        catalog: &mut MessageCatalog,
    ) -> Result<()> {
        let blocking_task = task.clone();
        let blocking_config = config.clone();
        let files = tokio::task::spawn_blocking(move || {
            read_namespace(&blocking_task, &blocking_config)
        })
        .await
        .context("Default message extraction panicked")??;

        let mut problems = Vec::new();
        for (file, labels) in files {
            for label in labels {
                if let Err(problem) = add_label(&task.namespace, &file, label, config, catalog) {
                    problems.push(problem);
                }
            }
        }

        tracing::debug!(
            namespace = %task.namespace,
            messages = catalog.len(),
            problems = problems.len(),
            "extracted default messages"
        );

        if problems.is_empty() {
            Ok(())
        } else {
            Err(FailError::new(problems.join("\n")).into())
        }
    }
}

fn overlaps(namespace_path: &Path, filter: &Path) -> bool {
    namespace_path.starts_with(filter) || filter.starts_with(namespace_path)
}

/// Labels of every file owned by the task's namespace, in path order.
fn read_namespace(task: &ExtractionTask, config: &I18nConfig) -> Result<Vec<(PathBuf, Vec<Label>)>> {
    let mut files = Vec::new();
    for dir in &task.paths {
        if !dir.exists() {
            return Err(FailError::new(format!(
                "Path of namespace \"{}\" does not exist: {}",
                task.namespace,
                config.display(dir)
            ))
            .into());
        }
        files.extend(
            collect_source_files(dir, config)?
                .into_iter()
                .filter(|file| config.namespace_for(file) == Some(task.namespace.as_str())),
        );
    }
    files.sort();
    files.dedup();

    files
        .into_par_iter()
        .map(|file| {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read source file: {}", file.display()))?;
            let labels = extract_labels(&content);
            Ok((file, labels))
        })
        .collect()
}

fn add_label(
    namespace: &str,
    file: &Path,
    label: Label,
    config: &I18nConfig,
    catalog: &mut MessageCatalog,
) -> Result<(), String> {
    let location = format!("{}:{}", config.display(file), label.line);

    let in_namespace = label
        .id
        .strip_prefix(namespace)
        .is_some_and(|rest| rest.starts_with('.') && rest.len() > 1);
    if !in_namespace {
        return Err(format!(
            "Expected \"{}\" id to have \"{}\" namespace prefix ({})",
            label.id, namespace, location
        ));
    }

    let message = match label.message {
        Some(message) if !message.trim().is_empty() => message,
        _ => {
            return Err(format!(
                "Empty defaultMessage for \"{}\" ({})",
                label.id, location
            ));
        }
    };

    let descriptor = MessageDescriptor {
        message,
        description: label.description,
        file: file.to_path_buf(),
        line: label.line,
    };
    let new_message = descriptor.message.clone();
    catalog
        .insert(label.id, descriptor)
        .map_err(|duplicate| {
            format!(
                "There is more than one default message for the same id \"{}\": \"{}\" ({}:{}) and \"{}\" ({})",
                duplicate.id,
                duplicate.existing.message,
                config.display(&duplicate.existing.file),
                duplicate.existing.line,
                new_message,
                location
            )
        })
}
