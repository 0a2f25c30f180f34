//! Runtime configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

/// Default OpenAI-compatible chat completions endpoint.
pub const DEFAULT_GENERATION_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default model identifier.
pub const DEFAULT_GENERATION_MODEL: &str = "gpt-4o-mini";

/// Settings for the text-generation endpoint.
#[derive(Clone)]
pub struct GenerationConfig {
    pub endpoint: String,
    pub model: String,
    pub api_keys: Vec<String>,
    pub cooldown: Duration,
}

impl std::fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_keys", &format_args!("[{} redacted]", self.api_keys.len()))
            .field("cooldown", &self.cooldown)
            .finish()
    }
}

/// Settings for the chat gateway.
#[derive(Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub channel_id: String,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("channel_id", &self.channel_id)
            .finish()
    }
}

/// Full server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub generation: GenerationConfig,
    pub gateway: GatewayConfig,
    /// Selects the `PostgreSQL` snapshot store when set.
    pub database_url: Option<String>,
    /// Directory of the file snapshot store, used without a database.
    pub snapshot_dir: PathBuf,
    pub vote_inactivity: Duration,
    pub vote_ceiling: Duration,
    pub phase_delay: Duration,
}

impl Config {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            var(key).ok_or_else(|| AppError::Config(format!("{key} environment variable must be set")))
        };
        let number = |key: &str, default: u64| -> Result<u64, AppError> {
            var(key).map_or(Ok(default), |raw| {
                raw.trim()
                    .parse()
                    .map_err(|e| AppError::Config(format!("{key} must be a whole number: {e}")))
            })
        };

        let port = var("PORT").map_or(Ok(3000), |raw| {
            raw.trim()
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))
        })?;

        let api_keys: Vec<String> = required("GENERATION_API_KEYS")?
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_owned)
            .collect();
        if api_keys.is_empty() {
            return Err(AppError::Config(
                "GENERATION_API_KEYS must contain at least one key".into(),
            ));
        }

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port,
            generation: GenerationConfig {
                endpoint: var("GENERATION_ENDPOINT")
                    .unwrap_or_else(|| DEFAULT_GENERATION_ENDPOINT.to_owned()),
                model: var("GENERATION_MODEL").unwrap_or_else(|| DEFAULT_GENERATION_MODEL.to_owned()),
                api_keys,
                cooldown: Duration::from_secs(number("GENERATION_COOLDOWN_SECS", 600)?),
            },
            gateway: GatewayConfig {
                base_url: required("CHAT_GATEWAY_URL")?,
                token: var("CHAT_GATEWAY_TOKEN"),
                channel_id: required("CHAT_CHANNEL_ID")?,
            },
            database_url: var("DATABASE_URL"),
            snapshot_dir: var("SNAPSHOT_DIR").map_or_else(|| PathBuf::from("./data"), PathBuf::from),
            vote_inactivity: Duration::from_secs(number("VOTE_INACTIVITY_SECS", 5)?),
            vote_ceiling: Duration::from_secs(number("VOTE_CEILING_SECS", 30)?),
            phase_delay: Duration::from_millis(number("PHASE_DELAY_MS", 2000)?),
        })
    }
}
