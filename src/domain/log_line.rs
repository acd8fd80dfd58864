use super::log_level::LineLevel;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single line buffered by the remote sink and shipped in an ingest batch.
///
/// Field names follow the ingest wire format: `text` is sent as `line` and
/// `application` as `app`. `meta` is omitted from the JSON entirely when the
/// caller supplied no auxiliary data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogLine {
    /// Epoch milliseconds at the moment the line was queued.
    pub timestamp: i64,
    #[serde(rename = "line")]
    pub text: String,
    #[serde(rename = "app")]
    pub application: String,
    pub level: LineLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// Auxiliary data handed to the remote sink alongside an info message.
///
/// The facade wraps caller data under `meta` for the remote sink while the
/// local sink receives it unwrapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineExtras {
    pub meta: Value,
}

impl LineExtras {
    pub fn new(meta: Value) -> Self {
        Self { meta }
    }
}

/// JSON body of one flush: `{ "lines": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestPayload {
    pub lines: Vec<LogLine>,
}

impl IngestPayload {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
