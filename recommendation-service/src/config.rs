use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context as _, anyhow};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_TOKENS: u64 = 1500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_MESSAGES_MODEL: &str = "claude-3-haiku-20240307";
pub const DEFAULT_MESSAGES_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Which generative backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenRouter,
    Messages,
}

impl FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openrouter" => Ok(Self::OpenRouter),
            "messages" | "anthropic" => Ok(Self::Messages),
            other => Err(anyhow!("unknown LLM provider '{other}'")),
        }
    }
}

/// When a fallback response carries `"source": "fallback"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackMarkerPolicy {
    /// Only when the backend call itself failed (or the workflow broke).
    /// Unparsable or invalid model output falls back silently.
    #[default]
    BackendOnly,
    /// On every fallback
    Always,
}

impl FromStr for FallbackMarkerPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "backend-only" | "backend_only" => Ok(Self::BackendOnly),
            "always" => Ok(Self::Always),
            other => Err(anyhow!("unknown fallback marker policy '{other}'")),
        }
    }
}

/// Settings for the generative backend
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    /// `None` disables the backend; every request then uses the fallback.
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u64,
    pub messages_api_url: String,
    pub timeout: Duration,
}

/// Knobs of the recommendation workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommenderOptions {
    pub marker_policy: FallbackMarkerPolicy,
    /// Drop model suggestions whose book id is not in the catalog
    pub validate_book_ids: bool,
}

impl Default for RecommenderOptions {
    fn default() -> Self {
        Self {
            marker_policy: FallbackMarkerPolicy::default(),
            validate_book_ids: true,
        }
    }
}

/// Configuration for the recommendation service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: String,
    pub port: u16,
    pub llm: LlmConfig,
    pub recommender: RecommenderOptions,
}

impl ServiceConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup, e.g. a map in tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = get("LLM_PROVIDER")
            .map(|v| v.parse::<LlmProvider>())
            .transpose()?
            .unwrap_or(LlmProvider::OpenRouter);

        let (key_var, default_model) = match provider {
            LlmProvider::OpenRouter => ("OPENROUTER_API_KEY", DEFAULT_OPENROUTER_MODEL),
            LlmProvider::Messages => ("ANTHROPIC_API_KEY", DEFAULT_MESSAGES_MODEL),
        };

        let llm = LlmConfig {
            provider,
            api_key: get(key_var),
            model: get("LLM_MODEL").unwrap_or_else(|| default_model.to_string()),
            max_tokens: parse_or(get("LLM_MAX_TOKENS"), "LLM_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
            messages_api_url: get("MESSAGES_API_URL")
                .unwrap_or_else(|| DEFAULT_MESSAGES_API_URL.to_string()),
            timeout: Duration::from_secs(parse_or(
                get("LLM_TIMEOUT_SECS"),
                "LLM_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
        };

        let recommender = RecommenderOptions {
            marker_policy: get("FALLBACK_MARKER")
                .map(|v| v.parse::<FallbackMarkerPolicy>())
                .transpose()?
                .unwrap_or_default(),
            validate_book_ids: parse_or(get("VALIDATE_BOOK_IDS"), "VALIDATE_BOOK_IDS", true)?,
        };

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(get("PORT"), "PORT", DEFAULT_PORT)?,
            llm,
            recommender,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: '{raw}'")),
        None => Ok(default),
    }
}
