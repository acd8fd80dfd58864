use super::transport::{Transport, TransportError};
use crate::domain::IngestPayload;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connection_timeout: Duration,
    pub max_idle_connections: usize,
    pub keep_alive_timeout: Duration,
    pub user_agent: String,
    pub enable_compression: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connection_timeout: Duration::from_secs(10),
            max_idle_connections: 4,
            keep_alive_timeout: Duration::from_secs(60),
            user_agent: format!("tandem-log/{}", env!("CARGO_PKG_VERSION")),
            enable_compression: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStats {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub bytes_sent: u64,
    pub average_response_time: Duration,
}

#[derive(Debug, Default)]
struct ClientStats {
    total_requests: AtomicU64,
    successful_requests: AtomicU64,
    failed_requests: AtomicU64,
    bytes_sent: AtomicU64,
    total_response_time: AtomicU64,
}

impl ClientStats {
    fn record_request(&self, success: bool, bytes: usize, response_time: Duration) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.total_response_time
            .fetch_add(response_time.as_millis() as u64, Ordering::Relaxed);

        if success {
            self.successful_requests.fetch_add(1, Ordering::Relaxed);
            self.bytes_sent.fetch_add(bytes as u64, Ordering::Relaxed);
        } else {
            self.failed_requests.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// `reqwest`-backed transport posting ingest batches as JSON.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
    stats: Arc<ClientStats>,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let mut client_builder = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connection_timeout)
            .pool_max_idle_per_host(config.max_idle_connections)
            .pool_idle_timeout(config.keep_alive_timeout)
            .user_agent(&config.user_agent);

        if config.enable_compression {
            client_builder = client_builder.gzip(true);
        }

        let client = client_builder.build().map_err(|e| {
            TransportError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            config,
            stats: Arc::new(ClientStats::default()),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn connection_stats(&self) -> ConnectionStats {
        let total_requests = self.stats.total_requests.load(Ordering::Relaxed);
        let total_response_time = self.stats.total_response_time.load(Ordering::Relaxed);

        let average_response_time = if total_requests > 0 {
            Duration::from_millis(total_response_time / total_requests)
        } else {
            Duration::ZERO
        };

        ConnectionStats {
            total_requests,
            successful_requests: self.stats.successful_requests.load(Ordering::Relaxed),
            failed_requests: self.stats.failed_requests.load(Ordering::Relaxed),
            bytes_sent: self.stats.bytes_sent.load(Ordering::Relaxed),
            average_response_time,
        }
    }
}

impl Transport for HttpTransport {
    async fn post(&self, url: &Url, body: &IngestPayload) -> Result<(), TransportError> {
        let payload = serde_json::to_vec(body).map_err(|e| {
            TransportError::InvalidConfiguration(format!("Failed to encode ingest payload: {e}"))
        })?;
        let bytes = payload.len();
        let start = Instant::now();

        let result = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(payload)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.stats.record_request(false, bytes, start.elapsed());
                if e.is_timeout() {
                    return Err(TransportError::RequestTimeout(e.to_string()));
                }
                return Err(TransportError::NetworkError(e));
            }
        };

        let status = response.status();
        self.stats
            .record_request(status.is_success(), bytes, start.elapsed());

        if status.is_success() {
            debug!("Posted {} lines ({} bytes): HTTP {}", body.len(), bytes, status);
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(TransportError::HttpError {
                status: status.as_u16(),
                message,
            })
        }
    }
}
