use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Secrets that ship in sample `.env` files and MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "change-me-to-a-random-string",
    "dev-secret-change-me",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DUOCHAT_PORT is not a valid port: {0}")]
    InvalidPort(String),

    #[error("invalid listen address {0}")]
    InvalidAddr(String),

    #[error("DUOCHAT_TOKEN_SECRET is still a placeholder value")]
    PlaceholderSecret,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub addr: SocketAddr,
    /// When set, bearer tokens must carry an HS256 signature under this secret.
    pub token_secret: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("DUOCHAT_DB_PATH").unwrap_or_else(|| "duochat.db".into());
        let host = lookup("DUOCHAT_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = lookup("DUOCHAT_PORT").unwrap_or_else(|| "3000".into());
        let port: u16 = port.parse().map_err(|_| ConfigError::InvalidPort(port))?;

        let addr = format!("{}:{}", host, port);
        let addr: SocketAddr = addr.parse().map_err(|_| ConfigError::InvalidAddr(addr))?;

        let token_secret = lookup("DUOCHAT_TOKEN_SECRET").filter(|s| !s.is_empty());
        if let Some(secret) = &token_secret {
            if PLACEHOLDER_SECRETS.contains(&secret.as_str()) {
                return Err(ConfigError::PlaceholderSecret);
            }
        }

        Ok(Self {
            db_path: db_path.into(),
            addr,
            token_secret,
        })
    }
}
