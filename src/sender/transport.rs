use crate::domain::IngestPayload;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Request timeout: {0}")]
    RequestTimeout(String),
    #[error("HTTP error: {status} - {message}")]
    HttpError { status: u16, message: String },
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

/// Ships one ingest batch to the remote endpoint.
///
/// Implementations fail on network errors and on any non-success status.
/// Retrying is not part of this contract.
pub trait Transport: Send + Sync {
    fn post(
        &self,
        url: &Url,
        body: &IngestPayload,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn post(
        &self,
        url: &Url,
        body: &IngestPayload,
    ) -> impl Future<Output = Result<(), TransportError>> + Send {
        (**self).post(url, body)
    }
}
