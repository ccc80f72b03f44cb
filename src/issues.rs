//! Recoverable conditions found during a run.
//!
//! None of these abort the run. Each issue is self-contained so the reporter
//! can print it without access to the pipeline that produced it. The single
//! fatal condition lives in [`crate::error::ExtractError`].

use enum_dispatch::enum_dispatch;
use thiserror::Error;

// ============================================================
// Kind
// ============================================================

/// Identifier for each issue type, printed next to the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IssueKind {
    UnreadableFile,
    MalformedLiteral,
    CollaboratorFailure,
    MissingPom,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueKind::UnreadableFile => write!(f, "unreadable-file"),
            IssueKind::MalformedLiteral => write!(f, "malformed-literal"),
            IssueKind::CollaboratorFailure => write!(f, "collaborator-failure"),
            IssueKind::MissingPom => write!(f, "missing-pom"),
        }
    }
}

// ============================================================
// Collaborator failures
// ============================================================

/// Why an external collaborator could not be used.
///
/// Always degrades to a local fallback; never surfaces as a run failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorFailure {
    #[error("decoding as {encoding} reached only {percent}% confidence, fell back to UTF-8")]
    LowConfidence { encoding: String, percent: u8 },
    #[error("no API key configured")]
    NotConfigured,
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// What kind of unterminated construct was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unterminated {
    StringLiteral,
    TextBlock,
    CharLiteral,
    BlockComment,
    Annotation,
}

impl std::fmt::Display for Unterminated {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unterminated::StringLiteral => write!(f, "string literal"),
            Unterminated::TextBlock => write!(f, "text block"),
            Unterminated::CharLiteral => write!(f, "char literal"),
            Unterminated::BlockComment => write!(f, "block comment"),
            Unterminated::Annotation => write!(f, "annotation"),
        }
    }
}

// ============================================================
// Issue types
// ============================================================

/// A source file that could not be read. The file is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableFileIssue {
    pub path: String,
    pub reason: String,
}

/// An unterminated string, char, comment or annotation.
///
/// The lexer recovers by treating the text after the opening delimiter as code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLiteralIssue {
    pub path: String,
    pub line: usize,
    pub construct: Unterminated,
}

/// An encoding guess or model call that fell back to the local strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaboratorFailureIssue {
    /// File the failure relates to, if any.
    pub path: Option<String>,
    /// What the collaborator was asked to do.
    pub subject: String,
    pub failure: CollaboratorFailure,
}

/// The project root has no `pom.xml`; it may not be a Maven project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPomIssue {
    pub path: String,
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    UnreadableFile(UnreadableFileIssue),
    MalformedLiteral(MalformedLiteralIssue),
    CollaboratorFailure(CollaboratorFailureIssue),
    MissingPom(MissingPomIssue),
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLocation<'a> {
    Line { path: &'a str, line: usize },
    File { path: &'a str },
    None,
}

#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    fn message(&self) -> String;

    fn kind(&self) -> IssueKind;
}

impl Report for UnreadableFileIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.path }
    }

    fn message(&self) -> String {
        format!("cannot read file: {}", self.reason)
    }

    fn kind(&self) -> IssueKind {
        IssueKind::UnreadableFile
    }
}

impl Report for MalformedLiteralIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Line {
            path: &self.path,
            line: self.line,
        }
    }

    fn message(&self) -> String {
        format!("unterminated {}", self.construct)
    }

    fn kind(&self) -> IssueKind {
        IssueKind::MalformedLiteral
    }
}

impl Report for CollaboratorFailureIssue {
    fn location(&self) -> ReportLocation<'_> {
        match &self.path {
            Some(path) => ReportLocation::File { path },
            None => ReportLocation::None,
        }
    }

    fn message(&self) -> String {
        format!("{}: {}", self.subject, self.failure)
    }

    fn kind(&self) -> IssueKind {
        IssueKind::CollaboratorFailure
    }
}

impl Report for MissingPomIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.path }
    }

    fn message(&self) -> String {
        "no pom.xml in project root, this may not be a Maven project".to_string()
    }

    fn kind(&self) -> IssueKind {
        IssueKind::MissingPom
    }
}
