use super::RemoteSink;
use super::stats::{AtomicDeliveryStats, DeliveryStats};
use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigError, LoggerConfig};
use crate::domain::{IngestPayload, LineExtras, LineLevel, LogLine};
use crate::sender::{Transport, TransportError};
use parking_lot::Mutex;
use std::future::Future;
use tracing::{debug, info, warn};
use url::Url;

/// Inputs that fix the remote sink's identity and request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub application: String,
    pub key: String,
    pub source: String,
    pub ingest_url: String,
}

impl From<&LoggerConfig> for RemoteConfig {
    fn from(config: &LoggerConfig) -> Self {
        Self {
            application: config.application.clone(),
            key: config.key.clone(),
            source: config.source.clone(),
            ingest_url: config.ingest_url.clone(),
        }
    }
}

/// Buffers log lines in memory and ships them as one batch per [`send`].
///
/// The request target is computed once at construction and embeds the
/// construction time. A flush takes the whole buffer under the lock and
/// leaves it empty before the request is made, so lines queued while a
/// request is in flight go out with the next flush. Delivery is
/// at-most-once: a failed batch is reported to the caller and not re-queued.
///
/// [`send`]: RemoteBufferSink::send
pub struct RemoteBufferSink<T, C = SystemClock> {
    application: String,
    url: Url,
    lines: Mutex<Vec<LogLine>>,
    transport: T,
    clock: C,
    stats: AtomicDeliveryStats,
}

impl<T: Transport> RemoteBufferSink<T> {
    pub fn new(config: RemoteConfig, transport: T) -> Result<Self, ConfigError> {
        Self::with_clock(config, transport, SystemClock)
    }
}

impl<T: Transport, C: Clock> RemoteBufferSink<T, C> {
    pub fn with_clock(config: RemoteConfig, transport: T, clock: C) -> Result<Self, ConfigError> {
        let url = build_request_url(&config, clock.now_millis())?;

        Ok(Self {
            application: config.application,
            url,
            lines: Mutex::new(Vec::new()),
            transport,
            clock,
            stats: AtomicDeliveryStats::default(),
        })
    }

    pub fn request_url(&self) -> &Url {
        &self.url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Number of lines waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn stats(&self) -> DeliveryStats {
        self.stats.snapshot()
    }

    pub fn info(&self, message: &str, extras: Option<LineExtras>) {
        self.push(message, LineLevel::Info, extras.map(|extras| extras.meta));
    }

    pub fn error(&self, message: &str) {
        self.push(message, LineLevel::Error, None);
    }

    pub async fn send(&self) -> Result<(), TransportError> {
        let lines = std::mem::take(&mut *self.lines.lock());
        if lines.is_empty() {
            return Ok(());
        }

        let count = lines.len();
        let payload = IngestPayload { lines };
        debug!("Flushing {} lines to {}", count, self.url.path());

        match self.transport.post(&self.url, &payload).await {
            Ok(()) => {
                self.stats.record_delivered(count);
                info!("Shipped batch of {} lines", count);
                Ok(())
            }
            Err(e) => {
                self.stats.record_dropped(count);
                warn!("Dropped batch of {} lines: {}", count, e);
                Err(e)
            }
        }
    }

    fn push(&self, message: &str, level: LineLevel, meta: Option<serde_json::Value>) {
        let line = LogLine {
            timestamp: self.clock.now_millis(),
            text: message.to_string(),
            application: self.application.clone(),
            level,
            meta,
        };

        self.lines.lock().push(line);
    }
}

impl<T: Transport, C: Clock> RemoteSink for RemoteBufferSink<T, C> {
    fn info(&self, message: &str, extras: Option<LineExtras>) {
        RemoteBufferSink::info(self, message, extras);
    }

    fn error(&self, message: &str) {
        RemoteBufferSink::error(self, message);
    }

    fn send(&self) -> impl Future<Output = Result<(), TransportError>> + Send {
        RemoteBufferSink::send(self)
    }
}

impl<T, C> Drop for RemoteBufferSink<T, C> {
    fn drop(&mut self) {
        let pending = self.lines.get_mut().len();
        if pending > 0 {
            warn!("Remote sink dropped with {} unsent lines", pending);
        }
    }
}

impl<T, C> std::fmt::Debug for RemoteBufferSink<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteBufferSink")
            .field("application", &self.application)
            .field("url", &self.url.path())
            .field("pending", &self.lines.lock().len())
            .field("stats", &self.stats.snapshot())
            .finish()
    }
}

fn build_request_url(config: &RemoteConfig, now: i64) -> Result<Url, ConfigError> {
    let now = now.to_string();
    Url::parse_with_params(
        &config.ingest_url,
        [
            ("apikey", config.key.as_str()),
            ("hostname", config.source.as_str()),
            ("now", now.as_str()),
        ],
    )
    .map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid ingest URL '{}': {}", config.ingest_url, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::DEFAULT_INGEST_URL;
    use std::time::Duration;

    struct NullTransport;

    impl Transport for NullTransport {
        async fn post(&self, _url: &Url, _body: &IngestPayload) -> Result<(), TransportError> {
            Ok(())
        }
    }

    fn config() -> RemoteConfig {
        RemoteConfig {
            application: "application".to_string(),
            key: "key".to_string(),
            source: "source".to_string(),
            ingest_url: DEFAULT_INGEST_URL.to_string(),
        }
    }

    #[test]
    fn test_request_url_fixed_at_construction() {
        let clock = ManualClock::new(1_700_000_000_000);
        let sink = RemoteBufferSink::with_clock(config(), NullTransport, clock.clone()).unwrap();
        clock.advance(Duration::from_secs(5));

        assert_eq!(
            sink.request_url().as_str(),
            "https://logs.logdna.com/logs/ingest?apikey=key&hostname=source&now=1700000000000"
        );
    }

    #[test]
    fn test_request_url_encodes_query_values() {
        let config = RemoteConfig {
            source: "@jrh/log".to_string(),
            ..config()
        };
        let sink = RemoteBufferSink::with_clock(config, NullTransport, ManualClock::new(1)).unwrap();

        assert_eq!(sink.request_url().query(), Some("apikey=key&hostname=%40jrh%2Flog&now=1"));
    }

    #[test]
    fn test_invalid_ingest_url() {
        let config = RemoteConfig {
            ingest_url: "::".to_string(),
            ..config()
        };
        let result = RemoteBufferSink::with_clock(config, NullTransport, ManualClock::new(1));

        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_lines_queue_in_order() {
        let sink = RemoteBufferSink::with_clock(config(), NullTransport, ManualClock::new(1)).unwrap();
        sink.info("one", None);
        sink.error("two");
        sink.info("three", Some(LineExtras::new(serde_json::json!({ "n": 3 }))));

        let lines = sink.lines.lock();
        let texts: Vec<_> = lines.iter().map(|line| line.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
        assert_eq!(lines[1].level, LineLevel::Error);
        assert_eq!(lines[2].meta, Some(serde_json::json!({ "n": 3 })));
    }

    #[tokio::test]
    async fn test_send_clears_buffer() {
        let sink = RemoteBufferSink::with_clock(config(), NullTransport, ManualClock::new(1)).unwrap();
        sink.info("one", None);
        assert_eq!(sink.pending(), 1);

        sink.send().await.unwrap();

        assert_eq!(sink.pending(), 0);
        assert_eq!(sink.stats().lines_sent, 1);
    }
}
