use crate::config::ConfigError;
use crate::sender::TransportError;
use crate::sink::SinkError;
use thiserror::Error;

/// Top-level error type for the logging facade.
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Local sink error: {0}")]
    Local(#[from] SinkError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}
