use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::{AssistRequest, Assistant, clean_answer};
use crate::issues::CollaboratorFailure;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 100;

/// Connection settings for an OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

/// Blocking client for `POST {base_url}/v1/chat/completions`.
///
/// One request per call, never retried.
pub struct OpenAiClient {
    settings: OpenAiSettings,
    client: Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AnswerMessage,
}

#[derive(Deserialize)]
struct AnswerMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(settings: OpenAiSettings) -> Result<Self, CollaboratorFailure> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(transport_failure)?;
        Ok(Self { settings, client })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

impl Assistant for OpenAiClient {
    fn respond(&self, request: &AssistRequest) -> Result<String, CollaboratorFailure> {
        let prompt = request.prompt();
        let body = ChatRequest {
            model: &self.settings.model,
            messages: [ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let endpoint = self.endpoint();
        tracing::debug!(%endpoint, model = %self.settings.model, "requesting completion");

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .map_err(transport_failure)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollaboratorFailure::Status(status.as_u16()));
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| CollaboratorFailure::Malformed(e.to_string()))?;
        let answer = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CollaboratorFailure::Malformed("no choices in response".to_string()))?;

        let answer = clean_answer(&answer);
        if answer.is_empty() {
            return Err(CollaboratorFailure::Malformed("empty answer".to_string()));
        }
        Ok(answer)
    }
}

fn transport_failure(err: reqwest::Error) -> CollaboratorFailure {
    if err.is_timeout() {
        CollaboratorFailure::Timeout
    } else {
        CollaboratorFailure::Transport(err.to_string())
    }
}
