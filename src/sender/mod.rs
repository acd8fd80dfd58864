pub mod client;
pub mod transport;

pub use client::{ClientConfig, ConnectionStats, HttpTransport};
pub use transport::{Transport, TransportError};
