use std::{mem, path::Path};

use anyhow::Result;

use super::{
    CommandResult, CommandSummary,
    helper::{connect_assistant, finish, rejected},
};
use crate::{
    ai::Assistant,
    cli::args::TranslateCommand,
    config::{ConfigLoadResult, load_config},
    core::translate::translate_file,
    issues::{CollaboratorFailure, CollaboratorFailureIssue, Issue},
};

pub fn translate(cmd: TranslateCommand) -> Result<CommandResult> {
    if !cmd.source.is_file() {
        return Ok(rejected(format!(
            "source file {} does not exist",
            cmd.source.display()
        )));
    }

    let start_dir = match cmd.source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let ConfigLoadResult { config, .. } = load_config(start_dir)?;

    let mut issues: Vec<Issue> = Vec::new();
    let client = match connect_assistant(&cmd.ai, &config.ai) {
        Ok(client) => Some(client),
        // Reported by the translator for every untranslated key.
        Err(CollaboratorFailure::NotConfigured) => None,
        Err(failure) => {
            issues.push(
                CollaboratorFailureIssue {
                    path: None,
                    subject: "translation".to_string(),
                    failure,
                }
                .into(),
            );
            None
        }
    };
    let assistant = client.as_ref().map(|c| c as &dyn Assistant);

    let mut report = translate_file(&cmd.source, &cmd.target, &cmd.lang, assistant)?;
    issues.append(&mut mem::take(&mut report.issues));

    Ok(finish(CommandSummary::Translate(report), issues))
}
