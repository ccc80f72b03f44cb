//! Language-model collaborator.
//!
//! The rest of the crate only sees the [`Assistant`] trait. Any failure is a
//! [`CollaboratorFailure`] value that callers turn into a local fallback.

mod openai;

pub use openai::{DEFAULT_BASE_URL, OpenAiClient, OpenAiSettings};

use crate::issues::CollaboratorFailure;

/// What the answer must look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// A short identifier of at most this many characters.
    MaxLength(usize),
    /// A translation into the given language code, e.g. `en`.
    TargetLanguage(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistRequest {
    pub text: String,
    pub constraint: Constraint,
}

impl AssistRequest {
    pub fn key_slug(text: &str, max_length: usize) -> Self {
        Self {
            text: text.to_string(),
            constraint: Constraint::MaxLength(max_length),
        }
    }

    pub fn translation(text: &str, language: &str) -> Self {
        Self {
            text: text.to_string(),
            constraint: Constraint::TargetLanguage(language.to_string()),
        }
    }

    /// The user prompt sent to the model.
    pub fn prompt(&self) -> String {
        match &self.constraint {
            Constraint::MaxLength(max) => format!(
                "Suggest a short English identifier for the following user interface text.\n\
                 Use only lower-case letters, digits and underscores, at most {max} characters.\n\
                 Reply with the identifier only.\n\n\
                 Text: {}",
                self.text
            ),
            Constraint::TargetLanguage(language) => format!(
                "Translate the following text into the language with code \"{language}\".\n\
                 The translation must be accurate, natural and suitable for a software user interface.\n\
                 Keep placeholders such as {{}}, {{0}} and %s unchanged.\n\
                 Reply with the translation only.\n\n\
                 Text: {}\n\
                 Translation:",
                self.text
            ),
        }
    }
}

/// Something that answers [`AssistRequest`]s.
pub trait Assistant {
    fn respond(&self, request: &AssistRequest) -> Result<String, CollaboratorFailure>;
}

const ANSWER_LABELS: &[&str] = &["英文翻译：", "英文翻译:", "Translation:", "translation:"];

/// Trim a model answer and drop a leading label the model may echo back.
pub fn clean_answer(answer: &str) -> String {
    let trimmed = answer.trim();
    ANSWER_LABELS
        .iter()
        .find_map(|label| trimmed.strip_prefix(label))
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}
