//! Domain layer for tandem-log.
//!
//! Contains the canonical types shared across all modules:
//! - `LogLine`: one buffered remote line, as it appears on the wire
//! - `LineLevel`: severity of a remote line (info/error)
//! - `LoggerError`: Top-level error type

pub mod error;
pub mod log_level;
pub mod log_line;

pub use error::LoggerError;
pub use log_level::LineLevel;
pub use log_line::{IngestPayload, LineExtras, LogLine};
