//! HTTP client for an OpenAI-compatible chat completions service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::prompt::{USER_PROMPT, build_system_prompt};
use super::{NarrativeProvider, NarrativeRequest};
use crate::config::NarrativeConfig;
use crate::error::{NarrativeError, NarrativeResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage; 2],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl ChatResponse {
    fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// Requests reading syntheses from a chat completions endpoint.
///
/// Sends exactly one request per reading. There is no retry: a slow or
/// failing service surfaces as a failed synthesis rather than a longer wait.
#[derive(Debug, Clone)]
pub struct ChatCompletionsProvider {
    config: NarrativeConfig,
    client: reqwest::Client,
}

impl ChatCompletionsProvider {
    /// Build a provider with the given settings.
    pub fn new(config: NarrativeConfig) -> NarrativeResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Build a provider from `TAROT_*` environment variables.
    pub fn from_env() -> NarrativeResult<Self> {
        Self::new(NarrativeConfig::from_env())
    }

    /// The settings this provider was built with.
    pub fn config(&self) -> &NarrativeConfig {
        &self.config
    }

    /// Whether an API key is configured.
    pub fn is_available(&self) -> bool {
        self.config.has_api_key() && !self.config.model.trim().is_empty()
    }

    fn payload(&self, request: &NarrativeRequest) -> ChatRequest<'_> {
        ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system".to_string(),
                    content: build_system_prompt(request, &self.config.language),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: USER_PROMPT.to_string(),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            stream: false,
        }
    }
}

#[async_trait]
impl NarrativeProvider for ChatCompletionsProvider {
    async fn request_narrative(&self, request: &NarrativeRequest) -> NarrativeResult<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(NarrativeError::NotConfigured("TAROT_API_KEY"))?;

        let url = self.config.completions_url();
        debug!(%url, model = %self.config.model, cards = request.cards.len(), "requesting narrative");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.payload(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "narrative service returned an error");
            return Err(NarrativeError::HttpStatus { status, body });
        }

        let bytes = response.bytes().await?;
        parse_completion(&bytes)
    }
}

/// Extract the first choice's text from a chat completions response body.
fn parse_completion(body: &[u8]) -> NarrativeResult<String> {
    let parsed: ChatResponse = serde_json::from_slice(body)?;
    parsed
        .first_content()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .ok_or(NarrativeError::EmptyResponse)
}
