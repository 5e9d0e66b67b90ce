//! Configuration loader
//!
//! Loads client configuration from environment variables, with `.env`
//! support for local development.
//!
//! ## Environment Variables
//! - `OPENPROJECT_URL`: Base endpoint of the OpenProject instance (required)
//! - `OPENPROJECT_API_KEY`: Static API token (required)
//! - `OPENPROJECT_HOST`: Optional outbound Host header override
//! - `OPENPROJECT_MAX_RETRIES`: Total request attempts, 1..=10 (default 3)

use opbridge_domain::{Config, ConnectionConfig, Error, Result, RetryConfig};
use url::Url;

/// Load configuration, reading a `.env` file first when one exists.
///
/// # Errors
/// Returns `Error::Config` when a required variable is missing or a value
/// fails validation.
pub fn load() -> Result<Config> {
    dotenvy::dotenv().ok();
    load_from_env()
}

/// Load configuration from already-set environment variables.
pub fn load_from_env() -> Result<Config> {
    let base_url = required_env("OPENPROJECT_URL")?;
    let api_key = required_env("OPENPROJECT_API_KEY")?;
    let host_header = std::env::var("OPENPROJECT_HOST").ok().filter(|h| !h.is_empty());

    let max_attempts = match std::env::var("OPENPROJECT_MAX_RETRIES") {
        Ok(raw) => raw
            .parse::<u32>()
            .map_err(|e| Error::Config(format!("Invalid OPENPROJECT_MAX_RETRIES: {e}")))?,
        Err(_) => RetryConfig::default().max_attempts,
    };

    let config = Config {
        connection: ConnectionConfig { base_url, api_key, host_header },
        retry: RetryConfig { max_attempts },
    };
    validate(&config)?;

    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Validate configuration values with detailed error messages.
pub fn validate(config: &Config) -> Result<()> {
    let url = Url::parse(&config.connection.base_url).map_err(|e| {
        Error::Config(format!("Invalid OPENPROJECT_URL {}: {e}", config.connection.base_url))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "Invalid OPENPROJECT_URL {}: must start with http:// or https://",
            config.connection.base_url
        )));
    }

    if config.connection.api_key.len() < 20 {
        return Err(Error::Config(
            "Invalid OPENPROJECT_API_KEY: appears to be too short. \
             OpenProject API keys are typically 40+ characters long; \
             verify the token under My Account -> Access Tokens."
                .into(),
        ));
    }

    if !(1..=10).contains(&config.retry.max_attempts) {
        return Err(Error::Config(format!(
            "Invalid OPENPROJECT_MAX_RETRIES {}: must be between 1 and 10",
            config.retry.max_attempts
        )));
    }

    Ok(())
}

/// Get required environment variable, with setup guidance in the message.
fn required_env(key: &str) -> Result<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty()).ok_or_else(|| match key {
        "OPENPROJECT_URL" => Error::Config(
            "Required environment variable OPENPROJECT_URL is not set. \
             Set it to your OpenProject endpoint, e.g. OPENPROJECT_URL=https://op.example.com"
                .into(),
        ),
        "OPENPROJECT_API_KEY" => Error::Config(
            "Required environment variable OPENPROJECT_API_KEY is not set. \
             Create a token under My Account -> Access Tokens and export it."
                .into(),
        ),
        other => Error::Config(format!("Required environment variable {other} is not set")),
    })
}
