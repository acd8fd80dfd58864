use super::id::{CORRELATION_ID_LENGTH, IdGenerator, RandomIdGenerator};
use crate::config::{ConfigError, LoggerConfig, Mode};
use crate::domain::{LineExtras, LoggerError};
use crate::sender::{ClientConfig, HttpTransport};
use crate::sink::{ConsoleSink, LocalSink, RemoteBufferSink, RemoteConfig, RemoteSink};
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

/// Dual-sink logging facade.
///
/// Every message is prefixed with the facade's correlation id (unless
/// disabled) and fanned out to the local sink immediately and to the remote
/// sink's buffer. [`Logger::complete`] flushes the remote buffer. In
/// [`Mode::Testing`] all three operations are silent no-ops.
pub struct Logger<L = ConsoleSink, R = RemoteBufferSink<HttpTransport>> {
    id: String,
    mode: RwLock<Option<Mode>>,
    include_unique_id: bool,
    local: L,
    remote: R,
}

impl<L: LocalSink, R: RemoteSink> Logger<L, R> {
    pub fn new<G>(config: &LoggerConfig, local: L, remote: R, ids: &G) -> Result<Self, ConfigError>
    where
        G: IdGenerator + ?Sized,
    {
        config.validate()?;

        let id = ids.generate(CORRELATION_ID_LENGTH);
        debug!(
            "Logger for {} ready (mode: {:?}, correlation id: {})",
            config.application, config.mode, id
        );

        Ok(Self {
            id,
            mode: RwLock::new(config.mode),
            include_unique_id: config.includes_unique_id(),
            local,
            remote,
        })
    }

    pub fn correlation_id(&self) -> &str {
        &self.id
    }

    pub fn mode(&self) -> Option<Mode> {
        *self.mode.read()
    }

    /// Changes the mode for every subsequent call.
    pub fn set_mode(&self, mode: Option<Mode>) {
        *self.mode.write() = mode;
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Logs on the default (info) path.
    ///
    /// The local sink receives `data` as given; the remote sink receives it
    /// wrapped as [`LineExtras`]. Without data neither sink gets a second
    /// argument; a JSON `null` counts as no data.
    pub fn log(&self, message: &str, data: Option<&Value>) -> Result<(), LoggerError> {
        if self.is_suppressed() {
            return Ok(());
        }

        let data = data.filter(|data| !data.is_null());
        let message = self.decorate(message);

        match data {
            None => {
                self.local.info(&message, None)?;
                self.remote.info(&message, None);
            }
            Some(data) => {
                self.local.info(&message, Some(data))?;
                self.remote
                    .info(&message, Some(LineExtras::new(data.clone())));
            }
        }

        Ok(())
    }

    pub fn info(&self, message: &str) -> Result<(), LoggerError> {
        self.log(message, None)
    }

    pub fn info_with(&self, message: &str, data: &Value) -> Result<(), LoggerError> {
        self.log(message, Some(data))
    }

    pub fn error(&self, message: &str) -> Result<(), LoggerError> {
        if self.is_suppressed() {
            return Ok(());
        }

        let message = self.decorate(message);

        self.local.error(&message)?;
        self.remote.error(&message);

        Ok(())
    }

    /// Flushes the remote sink and reports its outcome.
    pub async fn complete(&self) -> Result<(), LoggerError> {
        if self.is_suppressed() {
            return Ok(());
        }

        self.remote.send().await?;
        Ok(())
    }

    fn is_suppressed(&self) -> bool {
        matches!(*self.mode.read(), Some(Mode::Testing))
    }

    fn decorate(&self, message: &str) -> String {
        if self.include_unique_id {
            format!("({}) {}", self.id, message)
        } else {
            message.to_string()
        }
    }
}

impl<L, R> std::fmt::Debug for Logger<L, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("id", &self.id)
            .field("mode", &*self.mode.read())
            .field("include_unique_id", &self.include_unique_id)
            .finish_non_exhaustive()
    }
}

/// Builds a logger writing to stdio and shipping to the configured ingest URL.
pub fn create_logger(config: &LoggerConfig) -> Result<Logger, LoggerError> {
    create_logger_with(config, ClientConfig::default())
}

pub fn create_logger_with(
    config: &LoggerConfig,
    client_config: ClientConfig,
) -> Result<Logger, LoggerError> {
    config.validate()?;

    let transport = HttpTransport::new(client_config)?;
    let remote = RemoteBufferSink::new(RemoteConfig::from(config), transport)?;

    Ok(Logger::new(
        config,
        ConsoleSink::stdio(),
        remote,
        &RandomIdGenerator,
    )?)
}
