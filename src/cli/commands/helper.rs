use std::time::Duration;

use super::{CommandResult, CommandSummary};
use crate::{
    ai::{OpenAiClient, OpenAiSettings},
    cli::{
        args::{AiArgs, resolve_base_url},
        exit_status::ExitStatus,
    },
    config::AiConfig,
    issues::{CollaboratorFailure, Issue},
};

/// A completed command. Warnings never change the exit status.
pub fn finish(summary: CommandSummary, issues: Vec<Issue>) -> CommandResult {
    CommandResult {
        summary,
        issues,
        status: ExitStatus::Success,
    }
}

/// A command that refused its input.
pub fn rejected(message: impl Into<String>) -> CommandResult {
    CommandResult {
        summary: CommandSummary::Rejected(message.into()),
        issues: Vec::new(),
        status: ExitStatus::Failure,
    }
}

/// Build the model client from CLI flags and config.
///
/// Without an API key the collaborator is [`CollaboratorFailure::NotConfigured`].
pub fn connect_assistant(
    ai: &AiArgs,
    config: &AiConfig,
) -> Result<OpenAiClient, CollaboratorFailure> {
    let api_key = ai
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or(CollaboratorFailure::NotConfigured)?;

    OpenAiClient::new(OpenAiSettings {
        api_key: api_key.to_string(),
        base_url: resolve_base_url(ai, &config.base_url),
        model: ai.model.clone().unwrap_or_else(|| config.model.clone()),
        timeout: Duration::from_secs(config.timeout_secs),
    })
}
