//! Configuration management
//!
//! Settings are read from environment variables; the binary loads a
//! `.env` file first, so both work. Required: `MEGU_API_URL` and
//! `MEGU_PHONE_NUMBER`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration for the bot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the WhatsApp REST bridge
    pub api_url: String,

    /// Phone number the bot account is registered under
    pub phone_number: String,

    /// Polling interval in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval() -> u64 {
    2
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var("MEGU_API_URL")
            .map_err(|_| Error::Config("MEGU_API_URL is not set".to_string()))?;
        let phone_number = std::env::var("MEGU_PHONE_NUMBER")
            .map_err(|_| Error::Config("MEGU_PHONE_NUMBER is not set".to_string()))?;

        let poll_interval_secs = match std::env::var("MEGU_POLL_INTERVAL_SECS") {
            Ok(value) => value.parse().map_err(|_| {
                Error::Config(format!("invalid MEGU_POLL_INTERVAL_SECS: {value}"))
            })?,
            Err(_) => default_poll_interval(),
        };

        Ok(Self {
            api_url: normalize_api_url(&api_url),
            phone_number,
            poll_interval_secs,
        })
    }
}

fn normalize_api_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"api_url": "http://localhost:3000", "phone_number": "+628123456789"}"#,
        )
        .unwrap();
        assert_eq!(config.poll_interval_secs, 2);
    }

    #[test]
    fn test_api_url_loses_trailing_slash() {
        assert_eq!(normalize_api_url("http://localhost:3000/"), "http://localhost:3000");
        assert_eq!(normalize_api_url("http://localhost:3000"), "http://localhost:3000");
    }
}
