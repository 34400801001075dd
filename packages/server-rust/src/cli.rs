//! Command-line and environment configuration for the `regex-extractor` binary.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::network::{ConfigError, NetworkConfig};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per event.
    Json,
}

/// HTTP server that extracts labeled regex matches from posted text.
#[derive(Debug, Parser)]
#[command(name = "regex-extractor", version)]
pub struct ServerArgs {
    /// CSV file of `name,pattern` records.
    #[arg(short, long, env = "EXTRACTOR_PATTERNS_FILE")]
    pub file: PathBuf,

    /// Address to bind.
    #[arg(long, env = "EXTRACTOR_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "EXTRACTOR_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Route that accepts text for extraction.
    #[arg(long, env = "EXTRACTOR_PATH", default_value = "/")]
    pub path: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Largest request body accepted, in bytes. Unlimited when omitted.
    #[arg(long, env = "EXTRACTOR_MAX_BODY_BYTES")]
    pub max_body_bytes: Option<usize>,

    /// Allowed CORS origin; repeat for several. `*` allows any.
    #[arg(long = "cors-origin", default_value = "*")]
    pub cors_origins: Vec<String>,

    #[arg(long, value_enum, env = "EXTRACTOR_LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Expose Prometheus metrics on this address.
    #[arg(long, env = "EXTRACTOR_METRICS_ADDR")]
    pub metrics_addr: Option<SocketAddr>,
}

impl ServerArgs {
    /// Builds and validates the network configuration.
    ///
    /// # Errors
    ///
    /// Returns the validation error if the resulting configuration is unusable.
    pub fn network_config(&self) -> Result<NetworkConfig, ConfigError> {
        let config = NetworkConfig {
            host: self.host.clone(),
            port: self.port,
            extract_path: self.path.clone(),
            cors_origins: self.cors_origins.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_body_bytes: self.max_body_bytes,
        };
        config.validate()?;
        Ok(config)
    }
}
