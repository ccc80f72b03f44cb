//! Translation of a properties store into another language.
//!
//! Keys follow the source store's order. Existing target values are kept;
//! everything else is requested from the assistant, falling back to the
//! source value when no assistant is configured or a request fails.

use std::path::{Path, PathBuf};

use super::store::{ConfigStore, read_store, write_store};
use crate::{
    ai::{AssistRequest, Assistant},
    error::ExtractError,
    issues::{CollaboratorFailure, CollaboratorFailureIssue, Issue},
};

pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

#[derive(Debug, Default)]
pub struct TranslateOutcome {
    pub store: ConfigStore,
    /// Values returned by the assistant.
    pub translated: usize,
    /// Values taken over from the existing target.
    pub kept: usize,
    /// Values copied from the source after a failure or without an assistant.
    pub fallbacks: usize,
    /// Target keys no longer present in the source.
    pub dropped: usize,
    pub issues: Vec<Issue>,
}

pub fn translate_store(
    source: &ConfigStore,
    existing: &ConfigStore,
    language: &str,
    assistant: Option<&dyn Assistant>,
    source_path: &str,
) -> TranslateOutcome {
    let mut outcome = TranslateOutcome::default();

    if assistant.is_none() && source.keys().any(|key| !existing.contains_key(key)) {
        outcome.issues.push(
            CollaboratorFailureIssue {
                path: Some(source_path.to_string()),
                subject: "translation".to_string(),
                failure: CollaboratorFailure::NotConfigured,
            }
            .into(),
        );
    }

    for (key, value) in source.iter() {
        if let Some(kept) = existing.get(key) {
            outcome.kept += 1;
            outcome.store.insert(key, kept);
            continue;
        }

        let translated = match assistant {
            Some(_) if value.trim().is_empty() => Ok(value.to_string()),
            Some(assistant) => assistant.respond(&AssistRequest::translation(value, language)),
            None => Err(CollaboratorFailure::NotConfigured),
        };

        match translated {
            Ok(text) => {
                tracing::info!(key, from = value, to = %text, "translated");
                outcome.translated += 1;
                outcome.store.insert(key, text);
            }
            Err(failure) => {
                if failure != CollaboratorFailure::NotConfigured {
                    tracing::warn!(key, %failure, "translation failed, keeping source text");
                    outcome.issues.push(
                        CollaboratorFailureIssue {
                            path: Some(source_path.to_string()),
                            subject: format!("translation of \"{}\"", key),
                            failure,
                        }
                        .into(),
                    );
                }
                outcome.fallbacks += 1;
                outcome.store.insert(key, value);
            }
        }
    }

    outcome.dropped = existing.keys().filter(|k| !source.contains_key(k)).count();
    outcome
}

#[derive(Debug)]
pub struct TranslateReport {
    pub target: PathBuf,
    pub entries: usize,
    pub translated: usize,
    pub kept: usize,
    pub fallbacks: usize,
    pub dropped: usize,
    pub issues: Vec<Issue>,
}

/// Translate `source` into `target`, rewriting the target file.
pub fn translate_file(
    source: &Path,
    target: &Path,
    language: &str,
    assistant: Option<&dyn Assistant>,
) -> Result<TranslateReport, ExtractError> {
    let source_store = read_store(source)?;
    let existing = read_store(target)?;

    let outcome = translate_store(
        &source_store,
        &existing,
        language,
        assistant,
        &source.display().to_string(),
    );
    write_store(target, &outcome.store)?;

    Ok(TranslateReport {
        target: target.to_path_buf(),
        entries: outcome.store.len(),
        translated: outcome.translated,
        kept: outcome.kept,
        fallbacks: outcome.fallbacks,
        dropped: outcome.dropped,
        issues: outcome.issues,
    })
}
