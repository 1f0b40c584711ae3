//! Runtime configuration read from the environment.
//!
//! | Variable                    | Default     |
//! |-----------------------------|-------------|
//! | `LINKA_GEO_HOST`            | `127.0.0.1` |
//! | `LINKA_GEO_PORT`            | `3000`      |
//! | `LINKA_GEO_GAZETTEER`       | built-in    |
//! | `LINKA_GEO_MAX_SUGGESTIONS` | `20`        |
//! | `LINKA_GEO_LOG_FORMAT`      | `text`      |

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" | "compact" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown log format '{}'. Use 'text' or 'json'.", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// JSON gazetteer to load instead of the built-in table.
    pub gazetteer_path: Option<PathBuf>,
    /// Upper bound on `limit` for autocomplete requests.
    pub max_suggestions: usize,
    pub log_format: LogFormat,
}

impl Config {
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 3000;
    pub const DEFAULT_MAX_SUGGESTIONS: usize = 20;

    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("LINKA_GEO_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string());

        let port = match get("LINKA_GEO_PORT") {
            Some(v) => v.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: "LINKA_GEO_PORT",
                expected: "port number",
                value: v,
            })?,
            None => Self::DEFAULT_PORT,
        };

        let gazetteer_path = get("LINKA_GEO_GAZETTEER").map(PathBuf::from);

        let max_suggestions = match get("LINKA_GEO_MAX_SUGGESTIONS") {
            Some(v) => v.trim().parse::<usize>().map_err(|_| ConfigError::Invalid {
                var: "LINKA_GEO_MAX_SUGGESTIONS",
                expected: "number",
                value: v,
            })?,
            None => Self::DEFAULT_MAX_SUGGESTIONS,
        };

        let log_format = match get("LINKA_GEO_LOG_FORMAT") {
            Some(v) => v.parse::<LogFormat>().map_err(|_| ConfigError::Invalid {
                var: "LINKA_GEO_LOG_FORMAT",
                expected: "log format (text or json)",
                value: v,
            })?,
            None => LogFormat::Text,
        };

        Ok(Self {
            host,
            port,
            gazetteer_path,
            max_suggestions,
            log_format,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
            port: Self::DEFAULT_PORT,
            gazetteer_path: None,
            max_suggestions: Self::DEFAULT_MAX_SUGGESTIONS,
            log_format: LogFormat::Text,
        }
    }
}
