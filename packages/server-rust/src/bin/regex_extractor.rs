//! `regex-extractor`: serves labeled regex extraction over HTTP.
//!
//! Loads the pattern CSV once at startup; any unreadable record or invalid
//! pattern aborts launch.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use extractor_core::{load_registry, Extractor};
use extractor_server::network::os_shutdown_signal;
use extractor_server::{telemetry, NetworkModule, ServerArgs};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();

    telemetry::init_tracing(args.log_format)?;
    if let Some(addr) = args.metrics_addr {
        telemetry::install_metrics_exporter(addr)?;
    }

    let config = args.network_config()?;
    let registry = load_registry(&args.file)
        .with_context(|| format!("Failed to read the pattern file {}", args.file.display()))?;
    info!(patterns = registry.len(), "pattern registry built");

    let mut module = NetworkModule::new(config, Arc::new(Extractor::new(registry)));
    module.start().await?;
    module.serve(os_shutdown_signal()).await
}
