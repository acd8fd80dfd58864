mod serde_helpers;
mod validation;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_helpers::{load_env_string, load_env_var, load_env_var_opt};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Ingest endpoint used when the configuration does not name one.
pub const DEFAULT_INGEST_URL: &str = "https://logs.logdna.com/logs/ingest";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Environment error: {0}")]
    EnvError(String),
}

/// Process mode. `Testing` silences every sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Testing,
    Development,
    Staging,
    Production,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Testing => "testing",
            Mode::Development => "development",
            Mode::Staging => "staging",
            Mode::Production => "production",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "testing" => Ok(Mode::Testing),
            "development" => Ok(Mode::Development),
            "staging" => Ok(Mode::Staging),
            "production" => Ok(Mode::Production),
            other => Err(format!(
                "unknown mode '{other}'. Valid values: testing, development, staging, production"
            )),
        }
    }
}

/// Construction configuration of a [`Logger`](crate::Logger).
///
/// `application`, `key` and `source` are required; an empty value is rejected
/// by [`LoggerConfig::validate`] before any sink is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggerConfig {
    #[serde(default)]
    pub application: String,
    /// Ingest API key, sent as the `apikey` query parameter.
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub mode: Option<Mode>,
    /// Host identifier, sent as the `hostname` query parameter.
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub include_unique_id: Option<bool>,
    #[serde(default = "default_ingest_url")]
    pub ingest_url: String,
}

fn default_ingest_url() -> String {
    DEFAULT_INGEST_URL.to_string()
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            application: String::new(),
            key: String::new(),
            mode: None,
            source: String::new(),
            include_unique_id: None,
            ingest_url: default_ingest_url(),
        }
    }
}

impl LoggerConfig {
    pub fn new(
        application: impl Into<String>,
        key: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            application: application.into(),
            key: key.into(),
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_unique_id(mut self, include: bool) -> Self {
        self.include_unique_id = Some(include);
        self
    }

    pub fn with_ingest_url(mut self, url: impl Into<String>) -> Self {
        self.ingest_url = url.into();
        self
    }

    /// The correlation id prefix is applied unless explicitly disabled.
    pub fn includes_unique_id(&self) -> bool {
        self.include_unique_id.unwrap_or(true)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = LoggerConfig::default();

        load_env_string("LOG_APPLICATION", &mut config.application);
        load_env_string("LOG_KEY", &mut config.key);
        load_env_string("LOG_SOURCE", &mut config.source);
        load_env_var_opt("LOG_MODE", &mut config.mode)?;
        load_env_var_opt("LOG_INCLUDE_UNIQUE_ID", &mut config.include_unique_id)?;
        load_env_var("LOG_INGEST_URL", &mut config.ingest_url)?;

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: LoggerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
