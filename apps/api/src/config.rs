use anyhow::{Context, Result};

const DEFAULT_LANGFUSE_HOST: &str = "https://cloud.langfuse.com";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Application configuration loaded from environment variables.
/// Startup fails if the OpenAI key or either Langfuse key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub langfuse_public_key: String,
    pub langfuse_secret_key: String,
    pub langfuse_host: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: optional_env("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            langfuse_public_key: require_env("LANGFUSE_PUBLIC_KEY")?,
            langfuse_secret_key: require_env("LANGFUSE_SECRET_KEY")?,
            langfuse_host: optional_env("LANGFUSE_HOST", DEFAULT_LANGFUSE_HOST),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "debug"),
        })
    }
}

/// Treats an empty value the same as an unset one.
fn require_env(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
