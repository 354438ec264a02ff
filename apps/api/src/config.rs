use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;
use crate::review::pacing::{PACE_BETWEEN_CALLS_MS, RATE_LIMIT_COOLDOWN_MS};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_model: String,
    pub pace_between_calls_ms: u64,
    pub rate_limit_cooldown_ms: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            pace_between_calls_ms: env_millis("PACE_BETWEEN_CALLS_MS", PACE_BETWEEN_CALLS_MS)?,
            rate_limit_cooldown_ms: env_millis("RATE_LIMIT_COOLDOWN_MS", RATE_LIMIT_COOLDOWN_MS)?,
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

fn env_millis(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<u64>()
            .with_context(|| format!("{key} must be a duration in milliseconds")),
        Err(_) => Ok(default),
    }
}
