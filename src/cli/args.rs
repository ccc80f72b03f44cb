//! CLI argument definitions using clap.
//!
//! The top-level invocation extracts strings from a project:
//! `i18n4j <project_dir> <output_config_path>`. The positional form and the
//! subcommands are mutually exclusive.
//!
//! ## Commands
//!
//! - `translate`: Translate a properties file into another language
//! - `prune-placeholders`: Remove placeholder keys from locale variants
//! - `init`: Initialize i18n4j configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use encoding_rs::Encoding;

use crate::{
    ai::DEFAULT_BASE_URL,
    core::{
        prune::DEFAULT_MAIN_FILE, source::encoding_for_label, translate::DEFAULT_TARGET_LANGUAGE,
    },
};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about,
    long_about = None,
    args_conflicts_with_subcommands = true
)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub extract: ExtractArgs,
}

impl Arguments {
    /// Check if a command or a project was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() && self.extract.project_dir.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Translate(cmd)) => cmd.verbose,
            Some(Command::PrunePlaceholders(cmd)) => cmd.verbose,
            Some(Command::Init) => false,
            None => self.extract.verbose,
        }
    }
}

/// Language model connection, shared by commands that may call the model.
#[derive(Debug, Clone, Args)]
pub struct AiArgs {
    /// API key for the OpenAI-compatible endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the endpoint (overrides config file)
    #[arg(long, env = "OPENAI_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Model name (overrides config file)
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ExtractArgs {
    /// Root directory of the Java project
    #[arg(requires = "output_config_path")]
    pub project_dir: Option<PathBuf>,

    /// Output file (.properties or .ini), merged if it exists
    pub output_config_path: Option<PathBuf>,

    /// Encoding to try for files that are not UTF-8 (default: GBK)
    #[arg(long, value_parser = parse_encoding)]
    pub encoding: Option<&'static Encoding>,

    /// Ask the language model for English key names
    #[arg(long)]
    pub ai_keys: bool,

    /// Do not prefix keys with Maven module names (overrides config file)
    #[arg(long)]
    pub no_module_prefix: bool,

    #[command(flatten)]
    pub ai: AiArgs,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    /// Source properties file
    pub source: PathBuf,

    /// Target properties file, existing translations are kept
    pub target: PathBuf,

    /// Target language code
    #[arg(long, default_value = DEFAULT_TARGET_LANGUAGE)]
    pub lang: String,

    #[command(flatten)]
    pub ai: AiArgs,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct PruneCommand {
    /// Main properties file whose placeholder keys are removed from its locale variants
    #[arg(default_value = DEFAULT_MAIN_FILE)]
    pub main_file: PathBuf,

    /// Actually rewrite files (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate a properties file into another language
    Translate(TranslateCommand),
    /// Remove keys with {} placeholders from locale variants of a properties file
    PrunePlaceholders(PruneCommand),
    /// Initialize a new .i18n4jrc.json configuration file
    Init,
}

fn parse_encoding(label: &str) -> Result<&'static Encoding, String> {
    encoding_for_label(label).ok_or_else(|| format!("unknown encoding label \"{}\"", label))
}

pub fn resolve_base_url(ai: &AiArgs, configured: &str) -> String {
    ai.api_base_url
        .clone()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| {
            if configured.trim().is_empty() {
                DEFAULT_BASE_URL.to_string()
            } else {
                configured.to_string()
            }
        })
}
