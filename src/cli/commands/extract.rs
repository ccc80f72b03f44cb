use std::mem;

use anyhow::{Result, bail};

use super::{
    CommandResult, CommandSummary,
    helper::{connect_assistant, finish, rejected},
};
use crate::{
    cli::args::ExtractArgs,
    config::{ConfigLoadResult, load_config},
    core::{
        keys::KeyStrategy,
        pipeline::{ExtractRequest, extract_project},
        source::DecodeOptions,
    },
    issues::{CollaboratorFailureIssue, Issue},
};

pub fn extract(args: ExtractArgs) -> Result<CommandResult> {
    let (Some(project_dir), Some(output)) = (args.project_dir, args.output_config_path) else {
        bail!("Both a project directory and an output file are required.")
    };

    if !project_dir.is_dir() {
        return Ok(rejected(format!(
            "project directory {} does not exist or is not a directory",
            project_dir.display()
        )));
    }

    let ConfigLoadResult { config, .. } = load_config(&project_dir)?;
    let rules = config.key_rules();

    let mut issues: Vec<Issue> = Vec::new();
    let strategy = if args.ai_keys {
        match connect_assistant(&args.ai, &config.ai) {
            Ok(client) => {
                KeyStrategy::remote(Box::new(client), rules, config.ai.max_key_slug_length)
            }
            Err(failure) => {
                tracing::warn!(%failure, "key suggestions unavailable, using deterministic keys");
                issues.push(
                    CollaboratorFailureIssue {
                        path: None,
                        subject: "key suggestion".to_string(),
                        failure,
                    }
                    .into(),
                );
                KeyStrategy::deterministic(rules)
            }
        }
    } else {
        KeyStrategy::deterministic(rules)
    };

    let request = ExtractRequest {
        project_dir: &project_dir,
        output: &output,
        ignores: &config.ignores,
        ignore_test_files: config.ignore_test_files,
        module_prefix: config.module_prefix && !args.no_module_prefix,
        decode: DecodeOptions {
            fallback: args.encoding,
            confidence_threshold: config.encoding_confidence,
        },
    };

    let mut report = extract_project(&request, &strategy)?;
    issues.append(&mut mem::take(&mut report.issues));

    Ok(finish(CommandSummary::Extract(report), issues))
}
