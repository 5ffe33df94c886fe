//! Configuration module for environment variable parsing.
//!
//! Everything is read once at startup. The shared secret is mandatory; a
//! missing secret is the only fatal condition in the service.

use std::env;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Default listen port, matching the port the SuperApp sample integration uses.
pub const DEFAULT_PORT: u16 = 4004;

/// Default upper bound for a single outbound callback request.
pub const DEFAULT_CALLBACK_TIMEOUT_MS: u64 = 10_000;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {0} is set but empty")]
    Empty(&'static str),

    #[error("environment variable {name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Shared secret used for inbound verification and outbound signing
    pub secret: String,

    /// Port for the web server to listen on
    pub port: u16,

    /// Timeout applied to every outbound callback request
    pub callback_timeout_ms: u64,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("SALT").ok_or(ConfigError::Missing("SALT"))?;
        if secret.trim().is_empty() {
            return Err(ConfigError::Empty("SALT"));
        }

        Ok(Config {
            secret,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            callback_timeout_ms: parse_or(
                &lookup,
                "CALLBACK_TIMEOUT_MS",
                DEFAULT_CALLBACK_TIMEOUT_MS,
            )?,
        })
    }

    pub fn callback_timeout(&self) -> Duration {
        Duration::from_millis(self.callback_timeout_ms)
    }
}

// Never print the secret.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("secret", &"<redacted>")
            .field("port", &self.port)
            .field("callback_timeout_ms", &self.callback_timeout_ms)
            .finish()
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw,
        }),
    }
}
