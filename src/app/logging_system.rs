// Diagnostics of the crate itself. These never route through a Logger.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Error, Debug)]
pub enum LoggingInitError {
    #[error("Invalid directive '{0}': expected target=level")]
    InvalidDirective(String),
    #[error("Failed to build filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("Failed to install subscriber: {0}")]
    Install(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TracingLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl TracingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TracingLevel::Error => "error",
            TracingLevel::Warn => "warn",
            TracingLevel::Info => "info",
            TracingLevel::Debug => "debug",
            TracingLevel::Trace => "trace",
        }
    }
}

impl From<TracingLevel> for tracing::Level {
    fn from(level: TracingLevel) -> Self {
        match level {
            TracingLevel::Error => tracing::Level::ERROR,
            TracingLevel::Warn => tracing::Level::WARN,
            TracingLevel::Info => tracing::Level::INFO,
            TracingLevel::Debug => tracing::Level::DEBUG,
            TracingLevel::Trace => tracing::Level::TRACE,
        }
    }
}

pub struct LoggingSystem {
    default_level: TracingLevel,
    directives: Vec<(String, TracingLevel)>,
}

impl LoggingSystem {
    pub fn new(default_level: TracingLevel) -> Self {
        Self {
            default_level,
            directives: Vec::new(),
        }
    }

    /// HTTP stack crates are clamped to `warn` so request chatter stays out
    /// of the diagnostics.
    pub fn with_default_directives(mut self) -> Self {
        for target in ["hyper", "hyper_util", "reqwest", "h2", "rustls"] {
            self.directives.push((target.to_string(), TracingLevel::Warn));
        }
        self
    }

    pub fn add_directive(&mut self, directive: &str) -> Result<(), LoggingInitError> {
        let invalid = || LoggingInitError::InvalidDirective(directive.to_string());

        let (target, level) = directive.split_once('=').ok_or_else(invalid)?;
        if target.trim().is_empty() {
            return Err(invalid());
        }
        let level = TracingLevel::from_str(level.trim(), true).map_err(|_| invalid())?;

        self.directives.push((target.trim().to_string(), level));
        Ok(())
    }

    pub fn directive_count(&self) -> usize {
        self.directives.len()
    }

    pub fn build_filter_string(&self) -> String {
        std::iter::once(self.default_level.as_str().to_string())
            .chain(
                self.directives
                    .iter()
                    .map(|(target, level)| format!("{target}={}", level.as_str())),
            )
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Installs a compact stderr subscriber as the global default.
    pub fn initialize(&self) -> Result<(), LoggingInitError> {
        let env_filter = EnvFilter::try_new(self.build_filter_string())?;

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .compact(),
            )
            .try_init()
            .map_err(|e| LoggingInitError::Install(e.to_string()))
    }
}

/// Initializes diagnostics once per process; later calls return the first outcome.
pub fn setup_logging(level: TracingLevel) -> Result<(), LoggingInitError> {
    static INIT: OnceLock<Result<(), String>> = OnceLock::new();

    INIT.get_or_init(|| {
        LoggingSystem::new(level)
            .with_default_directives()
            .initialize()
            .map_err(|e| e.to_string())
    })
    .clone()
    .map_err(LoggingInitError::Install)
}
