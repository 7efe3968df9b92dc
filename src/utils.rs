//! Common utility functions shared across the codebase.

use std::path::{Component, Path, PathBuf};

/// Render a path relative to `root` with forward slashes.
///
/// Paths outside `root` are rendered as-is.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use i18n_check::utils::display_path;
///
/// assert_eq!(display_path(Path::new("/repo/src/app.ts"), Path::new("/repo")), "src/app.ts");
/// assert_eq!(display_path(Path::new("/other/x.ts"), Path::new("/repo")), "/other/x.ts");
/// assert_eq!(display_path(Path::new("/repo"), Path::new("/repo")), ".");
/// ```
pub fn display_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let rendered = relative.to_string_lossy().replace('\\', "/");
    if rendered.is_empty() {
        ".".to_string()
    } else {
        rendered
    }
}

/// Lexically normalize a path: drop `.` components and fold `..` into
/// their parent without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&base.join(path))
    }
}

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
pub fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find the 1-based line number for a byte offset using binary search.
pub fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}
