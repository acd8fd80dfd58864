//! The two destinations every log call fans out to.
//!
//! - [`LocalSink`]: synchronous, unbuffered console-equivalent output
//! - [`RemoteSink`]: in-memory buffer flushed to the ingest endpoint on demand

pub mod local;
pub mod remote;
pub mod stats;

pub use local::ConsoleSink;
pub use remote::{RemoteBufferSink, RemoteConfig};
pub use stats::DeliveryStats;

use crate::domain::LineExtras;
use crate::sender::TransportError;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Write failed: {0}")]
    Write(#[from] std::io::Error),
}

pub trait LocalSink: Send + Sync {
    /// Writes to the stdout-equivalent channel.
    fn info(&self, message: &str, data: Option<&Value>) -> Result<(), SinkError>;

    /// Writes to the stderr-equivalent channel.
    fn error(&self, message: &str) -> Result<(), SinkError>;
}

pub trait RemoteSink: Send + Sync {
    /// Queues an info line. Never performs I/O.
    fn info(&self, message: &str, extras: Option<LineExtras>);

    /// Queues an error line. Never performs I/O.
    fn error(&self, message: &str);

    /// Ships everything queued so far as one batch.
    fn send(&self) -> impl Future<Output = Result<(), TransportError>> + Send;
}

impl<S: LocalSink> LocalSink for Arc<S> {
    fn info(&self, message: &str, data: Option<&Value>) -> Result<(), SinkError> {
        (**self).info(message, data)
    }

    fn error(&self, message: &str) -> Result<(), SinkError> {
        (**self).error(message)
    }
}

impl<S: RemoteSink> RemoteSink for Arc<S> {
    fn info(&self, message: &str, extras: Option<LineExtras>) {
        (**self).info(message, extras);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }

    fn send(&self) -> impl Future<Output = Result<(), TransportError>> + Send {
        (**self).send()
    }
}
