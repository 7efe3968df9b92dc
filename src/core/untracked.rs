use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use rayon::prelude::*;

use super::collaborators::UntrackedScanner;
use super::labels::contains_labels;
use super::reporter::FailError;
use super::sources::collect_source_files;
use crate::config::{CONFIG_FILE_NAME, I18nConfig};

/// Finds source files that use i18n labels but belong to no namespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceScanner;

#[async_trait]
impl UntrackedScanner for SourceScanner {
    async fn scan(&self, root: &Path, config: &I18nConfig) -> Result<()> {
        if !root.exists() {
            return Err(FailError::new(format!(
                "Source path does not exist: {}",
                config.display(root)
            ))
            .into());
        }

        let root = root.to_path_buf();
        let scan_config = config.clone();
        let untracked = tokio::task::spawn_blocking(move || find_untracked(&root, &scan_config))
            .await
            .context("Untracked message scan panicked")??;

        if untracked.is_empty() {
            return Ok(());
        }

        let files: Vec<String> = untracked
            .iter()
            .map(|f| format!("  {}", config.display(f)))
            .collect();
        Err(FailError::new(format!(
            "{} file(s) contain i18n labels but are not covered by any namespace in {}:\n{}",
            untracked.len(),
            CONFIG_FILE_NAME,
            files.join("\n")
        ))
        .into())
    }
}

fn find_untracked(root: &Path, config: &I18nConfig) -> Result<Vec<PathBuf>> {
    let candidates: Vec<PathBuf> = collect_source_files(root, config)?
        .into_iter()
        .filter(|file| config.namespace_for(file).is_none())
        .collect();

    let matches: Vec<Option<PathBuf>> = candidates
        .into_par_iter()
        .map(|file| {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read source file: {}", file.display()))?;
            Ok(contains_labels(&content).then_some(file))
        })
        .collect::<Result<_>>()?;

    tracing::debug!(root = %root.display(), "untracked scan finished");
    Ok(matches.into_iter().flatten().collect())
}
