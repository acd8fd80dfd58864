#![warn(rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
#![allow(
    clippy::cast_possible_truncation, // Millisecond timestamps fit in i64
    clippy::missing_errors_doc,       // Internal API
    clippy::module_name_repetitions,  // e.g. SinkError in sink module
    clippy::must_use_candidate,
    clippy::doc_markdown
)]

pub mod app;
pub mod clock;
pub mod config;
pub mod domain;
pub mod logger;
pub mod sender;
pub mod sink;

// Re-export main types for easy access
pub use config::{ConfigError, LoggerConfig, Mode};
pub use domain::{LineExtras, LineLevel, LogLine, LoggerError};
pub use logger::{IdGenerator, Logger, RandomIdGenerator, create_logger};
pub use sink::{ConsoleSink, LocalSink, RemoteBufferSink, RemoteSink};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
