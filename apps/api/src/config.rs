use anyhow::{Context, Result};

const DEEPSEEK_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";
const DEEPSEEK_MODEL: &str = "deepseek-chat";
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Connection settings for one OpenAI-compatible chat-completion provider.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub name: String,
    pub api_url: String,
    pub model: String,
    /// Missing keys are allowed; the provider then fails every call and the
    /// chain falls through to the local fallback.
    pub api_key: Option<String>,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub llm_timeout_secs: u64,
    /// Provider A: consulted first on every call.
    pub primary: ProviderSettings,
    /// Provider B: consulted only when the primary reports payment required.
    pub secondary: ProviderSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            llm_timeout_secs: env_or("LLM_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            primary: ProviderSettings {
                name: "deepseek".to_string(),
                api_url: env_or("DEEPSEEK_API_URL", DEEPSEEK_API_URL),
                model: env_or("DEEPSEEK_MODEL", DEEPSEEK_MODEL),
                api_key: optional_env("DEEPSEEK_API_KEY"),
            },
            secondary: ProviderSettings {
                name: "openai".to_string(),
                api_url: env_or("OPENAI_API_URL", OPENAI_API_URL),
                model: env_or("OPENAI_MODEL", OPENAI_MODEL),
                api_key: optional_env("OPENAI_API_KEY"),
            },
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
