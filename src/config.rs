use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::{
    ai::DEFAULT_BASE_URL,
    core::{
        keys::{DEFAULT_MAX_KEY_LENGTH, DEFAULT_MIN_KEY_LENGTH, KeyRules},
        source::DEFAULT_CONFIDENCE_THRESHOLD,
    },
};

pub const CONFIG_FILE_NAME: &str = ".i18n4jrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_true")]
    pub ignore_test_files: bool,
    #[serde(default = "default_true")]
    pub module_prefix: bool,
    #[serde(default = "default_max_key_length")]
    pub max_key_length: usize,
    #[serde(default = "default_min_key_length")]
    pub min_key_length: usize,
    #[serde(default = "default_encoding_confidence")]
    pub encoding_confidence: f32,
    #[serde(default)]
    pub ai: AiConfig,
}

/// Language model endpoint used by `--ai-keys` and `translate`.
///
/// The API key is never read from the config file.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_key_slug_length")]
    pub max_key_slug_length: usize,
}

fn default_true() -> bool {
    true
}

fn default_max_key_length() -> usize {
    DEFAULT_MAX_KEY_LENGTH
}

fn default_min_key_length() -> usize {
    DEFAULT_MIN_KEY_LENGTH
}

fn default_encoding_confidence() -> f32 {
    DEFAULT_CONFIDENCE_THRESHOLD
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    "gemma3:12b".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_key_slug_length() -> usize {
    40
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            max_key_slug_length: default_max_key_slug_length(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            ignore_test_files: default_true(),
            module_prefix: default_true(),
            max_key_length: default_max_key_length(),
            min_key_length: default_min_key_length(),
            encoding_confidence: default_encoding_confidence(),
            ai: AiConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error naming the offending field.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.min_key_length == 0 || self.min_key_length > self.max_key_length {
            bail!(
                "'minKeyLength' must be between 1 and 'maxKeyLength' ({}), got {}",
                self.max_key_length,
                self.min_key_length
            );
        }
        // A truncated key keeps at least one character before its hash suffix.
        if self.max_key_length < 5 {
            bail!(
                "'maxKeyLength' must be at least 5, got {}",
                self.max_key_length
            );
        }
        if !(0.0..=1.0).contains(&self.encoding_confidence) {
            bail!(
                "'encodingConfidence' must be between 0 and 1, got {}",
                self.encoding_confidence
            );
        }
        if self.ai.max_key_slug_length == 0 {
            bail!("'ai.maxKeySlugLength' must be greater than 0");
        }

        Ok(())
    }

    pub fn key_rules(&self) -> KeyRules {
        KeyRules {
            min_length: self.min_key_length,
            max_length: self.max_key_length,
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the config file, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
