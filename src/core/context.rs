//! Run context for one extraction.
//!
//! Holds the global discovery order and the value index. Created at the start
//! of a run, fed one file at a time in traversal order, consumed when the
//! store is merged. Nothing here outlives the run.

use std::collections::HashMap;

use super::pipeline::FileScan;
use crate::issues::Issue;

/// Where an extracted value was seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub path: String,
    pub line: usize,
}

/// A distinct human-visible value, ready for key assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedString {
    pub value: String,
    /// Global first-seen index, in file then line order.
    pub order: usize,
    /// Module prefix of the file where the value was first seen.
    pub module_prefix: Option<String>,
    pub occurrences: Vec<Occurrence>,
}

#[derive(Debug, Default)]
pub struct ExtractionRun {
    next_order: usize,
    index: HashMap<String, usize>,
    strings: Vec<ExtractedString>,
    issues: Vec<Issue>,
    files_scanned: usize,
    literals_seen: usize,
}

impl ExtractionRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file's scan into the run. Must be called in traversal order.
    pub fn absorb(&mut self, scan: FileScan) {
        self.files_scanned += 1;
        self.literals_seen += scan.literal_count;
        self.issues.extend(scan.issues);

        for candidate in scan.candidates {
            self.record(
                candidate.value,
                scan.module_prefix.as_deref(),
                Occurrence {
                    path: scan.path.clone(),
                    line: candidate.line,
                },
            );
        }
    }

    /// Record one occurrence of `value`; the first one fixes its order.
    pub fn record(&mut self, value: String, module_prefix: Option<&str>, occurrence: Occurrence) {
        if let Some(&idx) = self.index.get(&value) {
            self.strings[idx].occurrences.push(occurrence);
            return;
        }

        self.index.insert(value.clone(), self.strings.len());
        self.strings.push(ExtractedString {
            value,
            order: self.next_order,
            module_prefix: module_prefix.map(str::to_string),
            occurrences: vec![occurrence],
        });
        self.next_order += 1;
    }

    pub fn push_issue(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn strings(&self) -> &[ExtractedString] {
        &self.strings
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    pub fn literals_seen(&self) -> usize {
        self.literals_seen
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}
