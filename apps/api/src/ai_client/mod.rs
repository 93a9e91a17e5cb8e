/// AI Client — the single point of entry for all completion-API calls.
///
/// ARCHITECTURAL RULE: No other module may call a provider API directly.
/// All completion requests MUST go through this module.
///
/// Two providers are supported (Together AI and OpenRouter), both speaking the
/// OpenAI-style chat-completions format. The provider is chosen per call, or
/// falls back to the configured default. Upstream failures are surfaced once
/// and never retried here; callers decide what a degraded response looks like.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

use crate::config::{AiProvider, Config};

const TOGETHER_API_URL: &str = "https://api.together.xyz/v1/chat/completions";
const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} API error (status {status}): {message}")]
    Api {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("{0} API key not configured")]
    KeyNotConfigured(&'static str),

    #[error("completion response contained no content")]
    EmptyContent,
}

/// One chat message in a completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Tuning knobs for a single completion call.
#[derive(Debug, Clone, Copy)]
pub struct CompletionParams {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Overrides the configured default provider when set.
    pub provider: Option<AiProvider>,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 512,
            provider: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: Option<u32>,
    completion_tokens: Option<u32>,
}

impl CompletionResponse {
    /// Extracts the assistant text from the first choice.
    fn text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The single completion client shared by all services.
#[derive(Clone)]
pub struct AiClient {
    client: Client,
    together_api_key: Option<String>,
    together_model: String,
    openrouter_api_key: Option<String>,
    openrouter_model: String,
    default_provider: AiProvider,
    app_url: String,
}

impl AiClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            together_api_key: config.together_api_key.clone(),
            together_model: config.together_model.clone(),
            openrouter_api_key: config.openrouter_api_key.clone(),
            openrouter_model: config.openrouter_model.clone(),
            default_provider: config.default_provider,
            app_url: config.app_url.clone(),
        })
    }

    /// Sends one completion request and returns the assistant text.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        params: CompletionParams,
    ) -> Result<String, AiError> {
        let provider = params.provider.unwrap_or(self.default_provider);
        match provider {
            AiProvider::Together => self.together(messages, &params).await,
            AiProvider::OpenRouter => self.openrouter(messages, &params).await,
        }
    }

    async fn together(
        &self,
        messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> Result<String, AiError> {
        let api_key = self
            .together_api_key
            .as_deref()
            .ok_or(AiError::KeyNotConfigured("Together"))?;

        let body = CompletionRequest {
            model: &self.together_model,
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response = self
            .client
            .post(TOGETHER_API_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        Self::read_text("Together", response).await
    }

    async fn openrouter(
        &self,
        messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> Result<String, AiError> {
        let api_key = self
            .openrouter_api_key
            .as_deref()
            .ok_or(AiError::KeyNotConfigured("OpenRouter"))?;

        let body = CompletionRequest {
            model: &self.openrouter_model,
            messages,
            // OpenRouter rejects out-of-range temperatures outright
            temperature: params.temperature.clamp(0.0, 2.0),
            max_tokens: params.max_tokens,
        };

        let response = self
            .client
            .post(OPENROUTER_API_URL)
            .bearer_auth(api_key)
            .header("HTTP-Referer", &self.app_url)
            .header("X-Title", "CareerCraft")
            .json(&body)
            .send()
            .await?;

        Self::read_text("OpenRouter", response).await
    }

    async fn read_text(
        provider: &'static str,
        response: reqwest::Response,
    ) -> Result<String, AiError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer the provider's structured error message when present
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AiError::Api {
                provider,
                status: status.as_u16(),
                message,
            });
        }

        let completion: CompletionResponse = response.json().await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "{provider} call succeeded: prompt_tokens={:?}, completion_tokens={:?}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        completion.text().ok_or(AiError::EmptyContent)
    }
}
