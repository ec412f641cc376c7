//! Bot configuration
//!
//! Three secrets are required (review API token, bot token, chat id); every
//! other setting has a default suited to the public Practicum deployment.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_LOG_FILE: &str = "homework_bot.log";

const DEFAULT_RETRY_PERIOD: Duration = Duration::from_secs(600);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required variables are unset or empty
    #[error("required environment variable(s) missing: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    /// A variable is set but unusable
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// The three secrets the bot cannot start without
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Secrets {
    pub practicum_token: Option<String>,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl Secrets {
    /// Reads the secrets through `lookup` (usually the process environment)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            practicum_token: lookup("PRACTICUM_TOKEN"),
            telegram_token: lookup("TELEGRAM_TOKEN"),
            telegram_chat_id: lookup("TELEGRAM_CHAT_ID"),
        }
    }

    /// Returns `true` when all three secrets are present and non-empty
    pub fn check_tokens(&self) -> bool {
        self.missing().is_empty()
    }

    /// Names of the variables that are unset or empty
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("PRACTICUM_TOKEN", &self.practicum_token),
            ("TELEGRAM_TOKEN", &self.telegram_token),
            ("TELEGRAM_CHAT_ID", &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
        .map(|(name, _)| name)
        .collect()
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("missing", &self.missing())
            .finish_non_exhaustive()
    }
}

/// Bot configuration
#[derive(Clone)]
pub struct Config {
    /// Review API token, sent as `Authorization: OAuth <token>`
    pub practicum_token: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Chat that receives every notification
    pub telegram_chat_id: String,

    /// Homework statuses endpoint
    pub endpoint: String,

    /// Telegram Bot API base URL
    pub telegram_api_url: String,

    /// Pause between poll iterations
    pub retry_period: Duration,

    /// Timeout applied to every outgoing HTTP request
    pub request_timeout: Duration,

    /// File the log is appended to
    pub log_file: PathBuf,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - PRACTICUM_TOKEN (required)
    /// - TELEGRAM_TOKEN (required)
    /// - TELEGRAM_CHAT_ID (required)
    /// - PRACTICUM_ENDPOINT (optional, default: Practicum homework_statuses URL)
    /// - TELEGRAM_API_URL (optional, default: https://api.telegram.org)
    /// - RETRY_PERIOD (optional, seconds, default: 600)
    /// - REQUEST_TIMEOUT (optional, seconds, default: 30)
    /// - LOG_FILE (optional, default: homework_bot.log)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secrets = Secrets::from_lookup(&lookup);
        if !secrets.check_tokens() {
            return Err(ConfigError::Missing(secrets.missing()));
        }

        let config = Self {
            practicum_token: secrets.practicum_token.unwrap_or_default(),
            telegram_token: secrets.telegram_token.unwrap_or_default(),
            telegram_chat_id: secrets.telegram_chat_id.unwrap_or_default(),
            endpoint: lookup("PRACTICUM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            telegram_api_url: lookup("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            retry_period: seconds(&lookup, "RETRY_PERIOD")?.unwrap_or(DEFAULT_RETRY_PERIOD),
            request_timeout: seconds(&lookup, "REQUEST_TIMEOUT")?
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            log_file: Self::log_file_from_lookup(&lookup),
        };

        config.validate()?;
        Ok(config)
    }

    /// Log file location, readable before the rest of the configuration
    ///
    /// Logging has to be up before a missing secret can be reported.
    pub fn log_file_from_env() -> PathBuf {
        Self::log_file_from_lookup(|key| std::env::var(key).ok())
    }

    fn log_file_from_lookup<F>(lookup: F) -> PathBuf
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("LOG_FILE")
            .filter(|path| !path.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
            .into()
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let secrets = Secrets {
            practicum_token: Some(self.practicum_token.clone()),
            telegram_token: Some(self.telegram_token.clone()),
            telegram_chat_id: Some(self.telegram_chat_id.clone()),
        };
        if !secrets.check_tokens() {
            return Err(ConfigError::Missing(secrets.missing()));
        }

        for (name, url) in [
            ("PRACTICUM_ENDPOINT", &self.endpoint),
            ("TELEGRAM_API_URL", &self.telegram_api_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Invalid(format!(
                    "{name} must start with http:// or https://"
                )));
            }
        }

        if self.retry_period.is_zero() {
            return Err(ConfigError::Invalid(
                "RETRY_PERIOD must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "REQUEST_TIMEOUT must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_period", &self.retry_period)
            .field("request_timeout", &self.request_timeout)
            .field("log_file", &self.log_file)
            .finish_non_exhaustive()
    }
}

fn seconds<F>(lookup: &F, key: &str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::Invalid(format!("{key} must be a whole number of seconds")))
        })
        .transpose()
}
