use anyhow::{Context, Result};
use tracing::warn;

/// Which completion provider a request is routed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProvider {
    Together,
    OpenRouter,
}

impl AiProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiProvider::Together => "together",
            AiProvider::OpenRouter => "openrouter",
        }
    }

    /// Parses a provider name, case-insensitively. Unrecognized names fall
    /// back to Together with a warning instead of failing startup.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "together" => AiProvider::Together,
            "openrouter" => AiProvider::OpenRouter,
            other => {
                warn!("Invalid AI provider '{other}', defaulting to 'together'");
                AiProvider::Together
            }
        }
    }
}

/// Application configuration loaded from environment variables.
/// Provider API keys are optional at startup; a call through an unconfigured
/// provider fails at call time instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub together_api_key: Option<String>,
    pub together_model: String,
    pub openrouter_api_key: Option<String>,
    pub openrouter_model: String,
    pub default_provider: AiProvider,
    pub app_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            together_api_key: optional_env("TOGETHER_API_KEY"),
            together_model: std::env::var("TOGETHER_MODEL")
                .unwrap_or_else(|_| "mistralai/Mixtral-8x7B-Instruct-v0.1".to_string()),
            openrouter_api_key: optional_env("OPENROUTER_API_KEY"),
            openrouter_model: std::env::var("OPENROUTER_MODEL")
                .unwrap_or_else(|_| "openai/gpt-3.5-turbo".to_string()),
            default_provider: AiProvider::parse_or_default(
                &std::env::var("DEFAULT_AI_PROVIDER").unwrap_or_else(|_| "together".to_string()),
            ),
            app_url: std::env::var("APP_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
