//! Regex extractor server: exposes the extraction engine over HTTP.

pub mod cli;
pub mod network;
pub mod telemetry;

pub use cli::{LogFormat, ServerArgs};
pub use network::{NetworkConfig, NetworkModule};
