use chrono::Duration;
use std::env;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{0} has an invalid value: {1}")]
    Invalid(&'static str, String),
}

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));
        let number = |key: &'static str, default: i64| -> Result<i64, ConfigError> {
            match lookup(key) {
                None => Ok(default),
                Some(raw) => match raw.parse::<i64>() {
                    Ok(value) if value > 0 => Ok(value),
                    _ => Err(ConfigError::Invalid(key, raw)),
                },
            }
        };

        let server_port = match lookup("SERVER_PORT") {
            None => 8080,
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("SERVER_PORT", raw))?,
        };

        let jwt_secret = required("JWT_SECRET_KEY")?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET_KEY", "<empty>".into()));
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            server_port,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            jwt_secret,
            access_token_minutes: number("ACCESS_TOKEN_MINUTES", 30)?,
            refresh_token_days: number("REFRESH_TOKEN_DAYS", 7)?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }

    pub fn access_token_ttl(&self) -> Duration {
        Duration::minutes(self.access_token_minutes)
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::days(self.refresh_token_days)
    }
}
