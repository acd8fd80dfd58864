#![allow(dead_code)]

use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use tandem_log::domain::{IngestPayload, LineExtras};
use tandem_log::sender::{Transport, TransportError};
use tandem_log::sink::{LocalSink, RemoteSink, SinkError};
use tokio::sync::Notify;
use url::Url;

pub const APP: &str = "application";

/// Transport that records every request and optionally rejects them.
#[derive(Default)]
pub struct RecordingTransport {
    pub requests: Mutex<Vec<(Url, IngestPayload)>>,
    pub reject_with: Option<u16>,
}

impl RecordingTransport {
    pub fn rejecting(status: u16) -> Self {
        Self {
            reject_with: Some(status),
            ..Self::default()
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn payload(&self, index: usize) -> IngestPayload {
        self.requests.lock()[index].1.clone()
    }
}

impl Transport for RecordingTransport {
    async fn post(&self, url: &Url, body: &IngestPayload) -> Result<(), TransportError> {
        self.requests.lock().push((url.clone(), body.clone()));

        match self.reject_with {
            Some(status) => Err(TransportError::HttpError {
                status,
                message: "rejected".to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Transport that holds every request open until released.
#[derive(Default)]
pub struct GatedTransport {
    pub requests: Mutex<Vec<IngestPayload>>,
    pub started: Notify,
    pub release: Notify,
}

impl Transport for GatedTransport {
    async fn post(&self, _url: &Url, body: &IngestPayload) -> Result<(), TransportError> {
        self.requests.lock().push(body.clone());
        self.started.notify_one();
        self.release.notified().await;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocalCall {
    Info(String, Option<Value>),
    Error(String),
}

#[derive(Default)]
pub struct RecordingLocal {
    pub calls: Mutex<Vec<LocalCall>>,
}

impl RecordingLocal {
    pub fn calls(&self) -> Vec<LocalCall> {
        self.calls.lock().clone()
    }
}

impl LocalSink for RecordingLocal {
    fn info(&self, message: &str, data: Option<&Value>) -> Result<(), SinkError> {
        self.calls
            .lock()
            .push(LocalCall::Info(message.to_string(), data.cloned()));
        Ok(())
    }

    fn error(&self, message: &str) -> Result<(), SinkError> {
        self.calls.lock().push(LocalCall::Error(message.to_string()));
        Ok(())
    }
}

/// Local sink whose writer is always broken.
pub struct FailingLocal;

impl LocalSink for FailingLocal {
    fn info(&self, _message: &str, _data: Option<&Value>) -> Result<(), SinkError> {
        Err(SinkError::Write(std::io::Error::other("stdout closed")))
    }

    fn error(&self, _message: &str) -> Result<(), SinkError> {
        Err(SinkError::Write(std::io::Error::other("stderr closed")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    Info(String, Option<LineExtras>),
    Error(String),
}

#[derive(Default)]
pub struct RecordingRemote {
    pub calls: Mutex<Vec<RemoteCall>>,
    pub sends: AtomicUsize,
    pub reject_with: Option<u16>,
}

impl RecordingRemote {
    pub fn rejecting(status: u16) -> Self {
        Self {
            reject_with: Some(status),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().clone()
    }

    pub fn send_count(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }
}

impl RemoteSink for RecordingRemote {
    fn info(&self, message: &str, extras: Option<LineExtras>) {
        self.calls
            .lock()
            .push(RemoteCall::Info(message.to_string(), extras));
    }

    fn error(&self, message: &str) {
        self.calls.lock().push(RemoteCall::Error(message.to_string()));
    }

    async fn send(&self) -> Result<(), TransportError> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        match self.reject_with {
            Some(status) => Err(TransportError::HttpError {
                status,
                message: "rejected".to_string(),
            }),
            None => Ok(()),
        }
    }
}
