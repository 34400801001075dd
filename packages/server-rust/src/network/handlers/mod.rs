//! HTTP handler definitions for the extraction server.
//!
//! This module defines `AppState` (the shared state carried through axum
//! extractors) and re-exports the handler functions used by the router.

pub mod extract;
pub mod health;

pub use extract::{extract_handler, ExtractError};
pub use health::{health_handler, liveness_handler, readiness_handler};

use std::sync::Arc;
use std::time::Instant;

use extractor_core::Extractor;

use super::{NetworkConfig, ShutdownController};

/// Shared application state passed to all axum handlers via `State` extraction.
///
/// Everything is behind an `Arc`, so cloning per request is cheap. The
/// extractor is immutable; handlers only ever read from it.
#[derive(Clone)]
pub struct AppState {
    /// Frozen pattern registry and extraction engine.
    pub extractor: Arc<Extractor>,
    /// Health state and in-flight tracking.
    pub shutdown: Arc<ShutdownController>,
    /// Network configuration (bind address, body limit, extract path).
    pub config: Arc<NetworkConfig>,
    /// Server process start time, used for uptime calculation.
    pub start_time: Instant,
}

#[cfg(test)]
pub(crate) mod test_support {
    use extractor_core::PatternRegistry;

    use super::*;

    /// Builds handler state over the given `(name, pattern)` pairs.
    pub(crate) fn state_with(patterns: &[(&str, &str)], config: NetworkConfig) -> AppState {
        let mut registry = PatternRegistry::new();
        for (name, source) in patterns {
            registry.add(*name, source).unwrap();
        }

        AppState {
            extractor: Arc::new(Extractor::new(registry)),
            shutdown: Arc::new(ShutdownController::new()),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }
}
