use super::super::exit_status::ExitStatus;
use crate::{
    core::{ExtractReport, PruneReport, TranslateReport},
    issues::Issue,
};

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractReport),
    Translate(TranslateReport),
    Prune(PruneReport),
    Init(InitSummary),
    /// The command refused its input; nothing was done.
    Rejected(String),
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: String,
}

/// Result of running an i18n4j command
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Recoverable issues, in the order they were found.
    pub issues: Vec<Issue>,
    pub status: ExitStatus,
}
