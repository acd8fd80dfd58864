pub mod cli;
pub mod logging_system;

pub use cli::{Cli, MessageLevel};
pub use logging_system::{LoggingInitError, LoggingSystem, TracingLevel, setup_logging};

use crate::logger::{Logger, create_logger_with};
use crate::sender::ClientConfig;
use crate::sink::{LocalSink, RemoteSink};
use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

/// Logs every message of one invocation, then flushes the remote sink.
pub async fn run<R>(cli: Cli, input: R) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let config = cli.logger_config().context("invalid logger configuration")?;
    let client_config = ClientConfig {
        timeout: cli.timeout(),
        ..ClientConfig::default()
    };
    let logger = create_logger_with(&config, client_config)?;
    debug!("Correlation id: {}", logger.correlation_id());

    let data = cli
        .data
        .as_deref()
        .map(serde_json::from_str::<Value>)
        .transpose()
        .context("--data must be valid JSON")?;
    if data.is_some() && cli.level == MessageLevel::Error {
        warn!("--data is ignored for error messages");
    }

    if cli.messages.is_empty() {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            emit(&logger, cli.level, &line, data.as_ref())?;
        }
    } else {
        for message in &cli.messages {
            emit(&logger, cli.level, message, data.as_ref())?;
        }
    }

    logger.complete().await.context("failed to ship remote logs")?;
    Ok(())
}

fn emit<L, R>(
    logger: &Logger<L, R>,
    level: MessageLevel,
    message: &str,
    data: Option<&Value>,
) -> anyhow::Result<()>
where
    L: LocalSink,
    R: RemoteSink,
{
    match level {
        MessageLevel::Info => logger.log(message, data)?,
        MessageLevel::Error => logger.error(message)?,
    }
    Ok(())
}

// Main entry point for the application
pub async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(cli.log_level) {
        eprintln!("Warning: diagnostics unavailable: {e}");
    }

    run(cli, BufReader::new(tokio::io::stdin())).await
}
