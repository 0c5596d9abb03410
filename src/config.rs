use crate::constants::*;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: String,
    pub data_path: String,
    /// `None` disables budget checking entirely.
    pub budget_limit: Option<f64>,
    pub email: EmailConfig,
}

/// Settings for the transactional email provider used by budget alerts.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_key: Option<String>,
    pub sender: String,
    pub recipient: String,
    pub api_url: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort(port) => {
                write!(f, "Invalid port number: {}", port)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = env::var("SERVER_PORT")
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| DEFAULT_PORT.to_string());
        let data_path = env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string());

        // Validate port is a valid number
        if port.parse::<u16>().is_err() {
            return Err(ConfigError::InvalidPort(port));
        }

        let budget_limit = env::var("BUDGET_LIMIT")
            .ok()
            .and_then(|raw| parse_budget_limit(&raw));

        Ok(Config {
            host,
            port,
            data_path,
            budget_limit,
            email: EmailConfig::from_env(),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl EmailConfig {
    pub fn from_env() -> Self {
        let api_key = env::var("EMAIL_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        EmailConfig {
            api_key,
            sender: env::var("EMAIL_SENDER").unwrap_or_else(|_| DEFAULT_EMAIL_SENDER.to_string()),
            recipient: env::var("BUDGET_ALERT_RECIPIENT")
                .unwrap_or_else(|_| DEFAULT_ALERT_RECIPIENT.to_string()),
            api_url: env::var("EMAIL_API_URL")
                .unwrap_or_else(|_| DEFAULT_EMAIL_API_URL.to_string()),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        EmailConfig {
            api_key: None,
            sender: DEFAULT_EMAIL_SENDER.to_string(),
            recipient: DEFAULT_ALERT_RECIPIENT.to_string(),
            api_url: DEFAULT_EMAIL_API_URL.to_string(),
        }
    }
}

/// Returns the limit only when it is a finite number greater than zero.
pub fn parse_budget_limit(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|limit| limit.is_finite() && *limit > 0.0)
}
