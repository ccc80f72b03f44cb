//! Remove placeholder-bearing keys from sibling locale files.
//!
//! Keys whose main-file value contains a `{…}` placeholder are deleted from
//! every `<stem>_<locale>.properties` next to it. All other lines are kept
//! byte for byte.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use glob::Pattern;
use regex::Regex;

use super::store::{ConfigStore, entry_key, read_store};
use crate::error::ExtractError;

pub const DEFAULT_MAIN_FILE: &str = "messages.properties";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\w*\}").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingPrune {
    pub path: PathBuf,
    pub removed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneReport {
    pub main: PathBuf,
    pub keys: Vec<String>,
    pub siblings: Vec<SiblingPrune>,
    pub applied: bool,
}

impl PruneReport {
    pub fn removed_count(&self) -> usize {
        self.siblings.iter().map(|s| s.removed.len()).sum()
    }
}

/// Keys whose value contains a placeholder, in store order.
pub fn placeholder_keys(store: &ConfigStore) -> Vec<String> {
    store
        .iter()
        .filter(|(_, value)| PLACEHOLDER.is_match(value))
        .map(|(key, _)| key.to_string())
        .collect()
}

/// Locale variants of `main` in the same directory, sorted by path.
pub fn sibling_locale_files(main: &Path) -> Vec<PathBuf> {
    let Some(stem) = main.file_stem().and_then(|s| s.to_str()) else {
        return Vec::new();
    };
    let Ok(pattern) = Pattern::new(&format!("{}_[a-z]*.properties", Pattern::escape(stem)))
    else {
        return Vec::new();
    };
    let dir = match main.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let main_name = main.file_name();
    let mut siblings: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter(|entry| Some(entry.file_name().as_os_str()) != main_name)
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| pattern.matches(name))
        })
        .map(|entry| entry.path())
        .collect();
    siblings.sort();
    siblings
}

/// Drop the entries for `keys` from properties text.
///
/// Continuation lines belonging to a removed entry go with it. Returns the
/// new text and the removed keys in file order.
pub fn remove_keys_from_text(text: &str, keys: &HashSet<&str>) -> (String, Vec<String>) {
    let mut out = String::with_capacity(text.len());
    let mut removed = Vec::new();
    let mut continuing = false;
    let mut skipping = false;

    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        let continues = content.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1;

        if !continuing {
            skipping = entry_key(content).is_some_and(|key| {
                let hit = keys.contains(key.as_str());
                if hit {
                    removed.push(key);
                }
                hit
            });
        }
        if !skipping {
            out.push_str(line);
        }
        continuing = continues;
    }

    (out, removed)
}

/// Find placeholder keys in `main` and remove them from its siblings.
///
/// Nothing is written unless `apply` is set.
pub fn prune_placeholders(main: &Path, apply: bool) -> Result<PruneReport, ExtractError> {
    let store = read_store(main)?;
    let keys = placeholder_keys(&store);
    let key_set: HashSet<&str> = keys.iter().map(String::as_str).collect();

    let mut siblings = Vec::new();
    if !key_set.is_empty() {
        for path in sibling_locale_files(main) {
            let text = fs::read_to_string(&path).map_err(|source| {
                ExtractError::StoreReadFailure {
                    path: path.clone(),
                    source,
                }
            })?;
            let (pruned, removed) = remove_keys_from_text(&text, &key_set);
            if removed.is_empty() {
                continue;
            }
            if apply {
                fs::write(&path, pruned).map_err(|source| ExtractError::OutputWriteFailure {
                    path: path.clone(),
                    source,
                })?;
            }
            tracing::debug!(path = %path.display(), removed = removed.len(), apply, "pruned");
            siblings.push(SiblingPrune { path, removed });
        }
    }

    Ok(PruneReport {
        main: main.to_path_buf(),
        keys,
        siblings,
        applied: apply,
    })
}
