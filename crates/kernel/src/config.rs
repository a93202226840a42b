//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// PostgreSQL connection URL. When None, content is kept in memory.
    pub database_url: Option<String>,

    /// Maximum database connections in pool (default: 10).
    pub database_max_connections: u32,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// Path to the access policy file (default: ./access.toml).
    pub access_policy_path: PathBuf,

    /// Text format applied to bodies submitted without one (default: basic_html).
    pub default_text_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            database_url: None,
            database_max_connections: 10,
            cors_allowed_origins: vec!["*".to_string()],
            access_policy_path: PathBuf::from("./access.toml"),
            default_text_format: "basic_html".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(v) => v.parse().context("PORT must be a valid u16")?,
            None => defaults.port,
        };

        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?,
            None => defaults.database_max_connections,
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.cors_allowed_origins);

        let access_policy_path = lookup("ACCESS_POLICY_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.access_policy_path);

        let default_text_format = lookup("DEFAULT_TEXT_FORMAT")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.default_text_format);

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            cors_allowed_origins,
            access_policy_path,
            default_text_format,
        })
    }
}
