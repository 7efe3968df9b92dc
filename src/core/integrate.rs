//! Compare a translation file against the extracted default messages.
//!
//! Translation files look like:
//!
//! ```json
//! {
//!   "formats": { "number": { "currency": { "style": "currency" } } },
//!   "messages": {
//!     "common.ui.title": "Titre",
//!     "common.ui.greeting": { "text": "Bonjour {name}", "comment": "Home page" }
//!   }
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};

use super::catalog::MessageCatalog;
use super::collaborators::{
    Incompatibility, IntegrateOptions, IntegrationReport, LocaleIntegrator,
};
use super::reporter::FailError;

const MESSAGES_KEY: &str = "messages";

/// Integrates JSON translation files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLocaleIntegrator;

#[async_trait]
impl LocaleIntegrator for JsonLocaleIntegrator {
    async fn integrate(
        &self,
        catalog: &MessageCatalog,
        options: IntegrateOptions,
    ) -> Result<IntegrationReport> {
        let display = options.config.display(&options.source_path);
        let content = tokio::fs::read_to_string(&options.source_path)
            .await
            .map_err(|err| {
                FailError::new(format!("Failed to read translation file {}: {}", display, err))
            })?;
        let mut root = parse_translation_file(&content, &display)?;

        let messages = match root.get(MESSAGES_KEY) {
            None => Map::new(),
            Some(Value::Object(messages)) => messages.clone(),
            Some(_) => {
                return Err(FailError::new(format!(
                    "\"{}\" in {} must be an object",
                    MESSAGES_KEY, display
                ))
                .into());
            }
        };

        let mut report = IntegrationReport::default();
        let mut kept = Map::new();
        for (id, value) in messages {
            if !options.in_scope(&id) {
                kept.insert(id, value);
                continue;
            }
            let Some(default) = catalog.get(&id) else {
                report.unused.push(id);
                continue;
            };
            let Some(text) = translation_text(&value) else {
                return Err(FailError::new(format!(
                    "Translation for \"{}\" in {} must be a string or an object with \"text\"",
                    id, display
                ))
                .into());
            };
            if let Some(incompatible) = Incompatibility::check(&id, &default.message, text) {
                report.incompatible.push(incompatible);
                continue;
            }
            report.translated += 1;
            kept.insert(id, value);
        }

        report.missing = catalog
            .iter()
            .map(|(id, _)| id)
            .filter(|id| options.in_scope(id) && !kept.contains_key(*id))
            .filter(|id| !report.incompatible.iter().any(|i| i.id == *id))
            .map(String::from)
            .collect();

        log_ignored(&report, &options, &display);
        let errors = collect_errors(&report, &options);
        if !errors.is_empty() {
            return Err(FailError::new(errors.join("\n")).into());
        }

        if let Some(target) = options.target_path.as_deref().filter(|_| !options.dry_run) {
            root.insert(MESSAGES_KEY.to_string(), Value::Object(kept));
            write_translation_file(target, root).await?;
            tracing::info!(
                translations = report.translated,
                "wrote {}",
                options.config.display(target)
            );
            report.written = Some(target.to_path_buf());
        }

        Ok(report)
    }
}

fn parse_translation_file(content: &str, display: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(root)) => Ok(root),
        Ok(_) => Err(FailError::new(format!(
            "Root of translation file {} must be an object",
            display
        ))
        .into()),
        Err(err) => Err(FailError::new(format!(
            "Failed to parse translation file {}: {}",
            display, err
        ))
        .into()),
    }
}

fn translation_text(value: &Value) -> Option<&str> {
    match value {
        Value::String(text) => Some(text),
        Value::Object(entry) => entry.get("text").and_then(Value::as_str),
        _ => None,
    }
}

fn log_ignored(report: &IntegrationReport, options: &IntegrateOptions, file: &str) {
    if options.ignore_incompatible && !report.incompatible.is_empty() {
        tracing::warn!(
            "{}: ignoring {} incompatible translation(s)",
            file,
            report.incompatible.len()
        );
    }
    if options.ignore_unused && !report.unused.is_empty() {
        tracing::warn!(
            "{}: ignoring {} unused translation(s)",
            file,
            report.unused.len()
        );
    }
    if options.ignore_missing && !report.missing.is_empty() {
        tracing::warn!(
            "{}: ignoring {} missing translation(s)",
            file,
            report.missing.len()
        );
    }
}

fn format_placeholders(names: &[String]) -> String {
    if names.is_empty() {
        "no placeholders".to_string()
    } else {
        names
            .iter()
            .map(|n| format!("{{{}}}", n))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn collect_errors(report: &IntegrationReport, options: &IntegrateOptions) -> Vec<String> {
    let mut errors = Vec::new();

    if !options.ignore_incompatible && !report.incompatible.is_empty() {
        errors.push(format!(
            "Incompatible translations ({}):",
            report.incompatible.len()
        ));
        for item in &report.incompatible {
            errors.push(format!(
                "  {}: expected {}, found {}",
                item.id,
                format_placeholders(&item.expected),
                format_placeholders(&item.found)
            ));
        }
    }
    if !options.ignore_unused && !report.unused.is_empty() {
        errors.push(format!("Unused translations ({}):", report.unused.len()));
        errors.extend(report.unused.iter().map(|id| format!("  {}", id)));
    }
    if !options.ignore_missing && !report.missing.is_empty() {
        errors.push(format!("Missing translations ({}):", report.missing.len()));
        errors.extend(report.missing.iter().map(|id| format!("  {}", id)));
    }

    errors
}

/// Write with 2-space indentation and a trailing newline.
async fn write_translation_file(path: &Path, root: Map<String, Value>) -> Result<()> {
    let content =
        serde_json::to_string_pretty(&Value::Object(root)).context("Failed to serialize JSON")?;
    tokio::fs::write(path, format!("{}\n", content))
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}
