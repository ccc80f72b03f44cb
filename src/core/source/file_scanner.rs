use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

pub const TEST_SOURCE_PATTERNS: &[&str] = &["**/src/test/**"];

/// Build output and tooling directories never holding sources to scan.
const SKIPPED_DIRS: &[&str] = &["target", "build", "out", "node_modules"];

fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// A path the walk could not enter or read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Java files in traversal order.
    pub files: Vec<PathBuf>,
    pub failures: Vec<WalkFailure>,
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || SKIPPED_DIRS.contains(&name))
}

/// Walk `root` for `*.java` files, sorted by file name at every level.
pub fn scan_java_files(root: &Path, ignores: &[String], ignore_test_files: bool) -> ScanResult {
    let mut result = ScanResult::default();

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => tracing::warn!(pattern = %p, error = %e, "invalid ignore pattern"),
            }
        } else {
            literal_ignore_paths.push(root.join(p));
        }
    }

    if ignore_test_files {
        glob_patterns.extend(TEST_SOURCE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
    }

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(error = %e, "cannot access path");
                let path = e.path().unwrap_or(root).to_path_buf();
                let reason = match e.io_error() {
                    Some(io) => io.to_string(),
                    None => e.to_string(),
                };
                result.failures.push(WalkFailure { path, reason });
                continue;
            }
        };
        let path = entry.path();

        if literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if glob_patterns
            .iter()
            .any(|p| p.matches_path(path) || p.matches_path(relative))
        {
            continue;
        }

        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "java") {
            result.files.push(path.to_path_buf());
        }
    }

    result
}
