//! Extraction pipeline.
//!
//! **Phase 1 (parallel)**: each file is decoded, lexed, merged and
//! classified on its own ([`scan_file`]).
//! **Phase 2 (sequential)**: scans are absorbed into an [`ExtractionRun`] in
//! traversal order, then merged into the existing store and written.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::{
    classify::classify,
    context::ExtractionRun,
    keys::KeyStrategy,
    lexer::{classify_regions, literal_occurrences, tokenize},
    merge::merge_literals,
    source::{
        DecodeOptions, POM_FILE_NAME, SourceFile, SourceUnit, discover_sources, load_source,
    },
    store::{AddedEntry, merge_extracted, read_store, write_store},
};
use crate::{
    error::ExtractError,
    issues::{
        CollaboratorFailureIssue, Issue, MalformedLiteralIssue, MissingPomIssue,
        UnreadableFileIssue,
    },
    utils::{build_line_index, offset_to_line},
};

/// An accepted value found in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub value: String,
    pub line: usize,
}

/// Everything one file contributes to a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileScan {
    pub path: String,
    pub module_prefix: Option<String>,
    /// String literal tokens before merging.
    pub literal_count: usize,
    /// Accepted values in source order, repeats included.
    pub candidates: Vec<Candidate>,
    pub issues: Vec<Issue>,
}

/// Lex, merge and classify one decoded file.
pub fn scan_unit(unit: &SourceUnit) -> FileScan {
    let regions = classify_regions(&unit.text);
    let line_index = build_line_index(&unit.text);

    let issues = regions
        .unclosed
        .iter()
        .map(|unclosed| {
            MalformedLiteralIssue {
                path: unit.path.clone(),
                line: offset_to_line(&line_index, unclosed.offset),
                construct: unclosed.construct,
            }
            .into()
        })
        .collect();

    let tokens = tokenize(&unit.text, &regions.regions, &line_index);
    let candidates = merge_literals(&tokens)
        .into_iter()
        .filter_map(|merged| {
            // Stores trim surrounding whitespace, so compare trimmed values.
            let value = merged.value.trim();
            classify(value).is_accepted().then(|| Candidate {
                value: value.to_string(),
                line: merged.line,
            })
        })
        .collect();

    FileScan {
        path: unit.path.clone(),
        module_prefix: unit.module_prefix.clone(),
        literal_count: literal_occurrences(&tokens).len(),
        candidates,
        issues,
    }
}

/// Read and scan one file. Read failures become an issue, never an error.
pub fn scan_file(file: &SourceFile, options: DecodeOptions) -> FileScan {
    match load_source(file, options) {
        Ok((unit, failure)) => {
            let mut scan = scan_unit(&unit);
            if let Some(failure) = failure {
                scan.issues.insert(
                    0,
                    CollaboratorFailureIssue {
                        path: Some(unit.path.clone()),
                        subject: "encoding detection".to_string(),
                        failure,
                    }
                    .into(),
                );
            }
            scan
        }
        Err(err) => {
            tracing::warn!(path = %file.path.display(), error = %err, "skipping unreadable file");
            FileScan {
                path: file.display_path.clone(),
                module_prefix: file.module_prefix.clone(),
                issues: vec![
                    UnreadableFileIssue {
                        path: file.display_path.clone(),
                        reason: err.to_string(),
                    }
                    .into(),
                ],
                ..FileScan::default()
            }
        }
    }
}

/// Scan all files in parallel; results keep the input order.
pub fn scan_files(files: &[SourceFile], options: DecodeOptions) -> Vec<FileScan> {
    files.par_iter().map(|file| scan_file(file, options)).collect()
}

/// Inputs of one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractRequest<'a> {
    pub project_dir: &'a Path,
    pub output: &'a Path,
    pub ignores: &'a [String],
    pub ignore_test_files: bool,
    pub module_prefix: bool,
    pub decode: DecodeOptions,
}

#[derive(Debug)]
pub struct ExtractReport {
    pub output: PathBuf,
    pub files_scanned: usize,
    pub literals_seen: usize,
    /// Distinct accepted values.
    pub extracted: usize,
    /// Entries in the store before the run.
    pub existing_entries: usize,
    pub added: Vec<AddedEntry>,
    pub already_present: usize,
    pub issues: Vec<Issue>,
}

/// Scan a project and merge its strings into the output store.
///
/// Only reading an existing store or writing the output can fail.
pub fn extract_project(
    request: &ExtractRequest<'_>,
    strategy: &KeyStrategy,
) -> Result<ExtractReport, ExtractError> {
    let mut run = ExtractionRun::new();

    if !request.project_dir.join(POM_FILE_NAME).is_file() {
        run.push_issue(
            MissingPomIssue {
                path: request.project_dir.display().to_string(),
            }
            .into(),
        );
    }

    let discovery = discover_sources(
        request.project_dir,
        request.ignores,
        request.ignore_test_files,
        request.module_prefix,
    );
    tracing::debug!(files = discovery.files.len(), "discovered java sources");
    for issue in discovery.unreadable {
        run.push_issue(issue.into());
    }

    for scan in scan_files(&discovery.files, request.decode) {
        run.absorb(scan);
    }

    let mut store = read_store(request.output)?;
    let existing_entries = store.len();
    let outcome = merge_extracted(&mut store, run.strings(), strategy);
    write_store(request.output, &store)?;

    let files_scanned = run.files_scanned();
    let literals_seen = run.literals_seen();
    let extracted = run.strings().len();
    let mut issues = run.into_issues();
    issues.extend(outcome.issues);

    Ok(ExtractReport {
        output: request.output.to_path_buf(),
        files_scanned,
        literals_seen,
        extracted,
        existing_entries,
        added: outcome.added,
        already_present: outcome.already_present,
        issues,
    })
}
