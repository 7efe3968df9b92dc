use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::{display_path, resolve_path};

pub const CONFIG_FILE_NAME: &str = ".i18nrc.json";

/// Source root used when no config declares `sourceRoots`.
pub const DEFAULT_SOURCE_ROOT: &str = "src";

/// On-disk shape of an `.i18nrc.json` file.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    /// Namespace to directory (or list of directories).
    #[serde(default)]
    pub paths: Map<String, Value>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub translations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_roots: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NamespacePaths {
    One(String),
    Many(Vec<String>),
}

impl NamespacePaths {
    fn into_vec(self) -> Vec<String> {
        match self {
            NamespacePaths::One(path) => vec![path],
            NamespacePaths::Many(paths) => paths,
        }
    }
}

/// A message-id prefix bound to one or more source directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub name: String,
    pub paths: Vec<PathBuf>,
}

/// Resolved configuration. All paths are absolute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct I18nConfig {
    /// Directory paths are displayed relative to.
    pub root: PathBuf,
    /// Namespaces in declaration order.
    pub namespaces: Vec<Namespace>,
    pub exclude: Vec<Pattern>,
    pub translations: Vec<PathBuf>,
    pub source_roots: Vec<PathBuf>,
}

impl I18nConfig {
    /// Build a resolved config from a parsed file, resolving every path
    /// against `base_dir`.
    pub fn from_file(file: ConfigFile, base_dir: &Path) -> Result<Self> {
        let mut namespaces = Vec::with_capacity(file.paths.len());
        for (name, value) in file.paths {
            if name.trim().is_empty() {
                bail!("Namespace names in 'paths' must not be empty");
            }
            let paths: NamespacePaths = serde_json::from_value(value).with_context(|| {
                format!(
                    "Namespace \"{}\" must map to a path or a list of paths",
                    name
                )
            })?;
            let paths = paths.into_vec();
            if paths.is_empty() {
                bail!("Namespace \"{}\" has no paths", name);
            }
            namespaces.push(Namespace {
                name,
                paths: paths
                    .iter()
                    .map(|p| resolve_path(base_dir, Path::new(p)))
                    .collect(),
            });
        }

        let mut exclude = Vec::with_capacity(file.exclude.len());
        for pattern in &file.exclude {
            let absolute = resolve_path(base_dir, Path::new(pattern));
            let compiled = Pattern::new(&absolute.to_string_lossy())
                .with_context(|| format!("Invalid glob pattern in 'exclude': \"{}\"", pattern))?;
            exclude.push(compiled);
        }

        let mut translations = Vec::with_capacity(file.translations.len());
        for path in &file.translations {
            if !path.ends_with(".json") {
                bail!("Translation file must be a JSON file: \"{}\"", path);
            }
            translations.push(resolve_path(base_dir, Path::new(path)));
        }

        let source_roots = file
            .source_roots
            .unwrap_or_default()
            .iter()
            .map(|p| resolve_path(base_dir, Path::new(p)))
            .collect();

        Ok(Self {
            root: base_dir.to_path_buf(),
            namespaces,
            exclude,
            translations,
            source_roots,
        })
    }

    /// Merge another config on top of this one.
    ///
    /// Namespace paths are appended, lists are concatenated without duplicates.
    pub fn merge(&mut self, other: I18nConfig) {
        for namespace in other.namespaces {
            match self.namespaces.iter_mut().find(|n| n.name == namespace.name) {
                Some(existing) => extend_unique(&mut existing.paths, namespace.paths),
                None => self.namespaces.push(namespace),
            }
        }
        extend_unique(&mut self.exclude, other.exclude);
        extend_unique(&mut self.translations, other.translations);
        extend_unique(&mut self.source_roots, other.source_roots);
    }

    /// The most specific namespace whose directories contain `file`.
    pub fn namespace_for(&self, file: &Path) -> Option<&str> {
        self.namespaces
            .iter()
            .flat_map(|ns| ns.paths.iter().map(move |p| (ns.name.as_str(), p)))
            .filter(|(_, dir)| file.starts_with(dir))
            .max_by_key(|(_, dir)| dir.components().count())
            .map(|(name, _)| name)
    }

    pub fn is_excluded(&self, file: &Path) -> bool {
        self.exclude.iter().any(|p| p.matches_path(file))
    }

    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.iter().find(|n| n.name == name)
    }

    /// Render `path` relative to the project root.
    pub fn display(&self, path: &Path) -> String {
        display_path(path, &self.root)
    }
}

fn extend_unique<T: PartialEq>(target: &mut Vec<T>, items: Vec<T>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Parse and resolve a single config file.
pub fn load_config_file(path: &Path) -> Result<I18nConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let file: ConfigFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    let base_dir = path.parent().unwrap_or(Path::new("."));
    I18nConfig::from_file(file, base_dir)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    pub config: I18nConfig,
    /// Config files that were merged, in merge order.
    pub sources: Vec<PathBuf>,
}

/// Load the project config found from `cwd` and merge `include_config` on top.
///
/// Without any config file the result is empty, which means there is
/// nothing to check.
pub fn merge_configs(cwd: &Path, include_config: Option<&Path>) -> Result<ConfigLoadResult> {
    let mut config = I18nConfig::default();
    let mut sources = Vec::new();

    if let Some(path) = find_config_file(cwd) {
        config = load_config_file(&path)?;
        sources.push(path);
    }

    if let Some(include) = include_config {
        let path = resolve_path(cwd, include);
        if !path.is_file() {
            bail!("Included config file not found: {}", path.display());
        }
        if !sources.contains(&path) {
            config.merge(load_config_file(&path)?);
            sources.push(path);
        }
    }

    config.root = cwd.to_path_buf();
    if config.source_roots.is_empty() {
        config.source_roots.push(resolve_path(cwd, Path::new(DEFAULT_SOURCE_ROOT)));
    }

    tracing::debug!(
        namespaces = config.namespaces.len(),
        translations = config.translations.len(),
        "loaded i18n config from {} file(s)",
        sources.len()
    );

    Ok(ConfigLoadResult { config, sources })
}
