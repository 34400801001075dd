//! Network module with deferred startup lifecycle.
//!
//! `new()` wires the extractor into shared state, `start()` binds the TCP
//! listener, and `serve()` accepts requests until the shutdown future
//! resolves. Binding separately from serving lets the caller learn the real
//! port (when configured with port 0) before traffic starts.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::routing::{any, get};
use axum::Router;
use extractor_core::Extractor;
use tokio::net::TcpListener;
use tracing::{info, warn};

use super::config::NetworkConfig;
use super::handlers::{
    extract_handler, health_handler, liveness_handler, readiness_handler, AppState,
};
use super::middleware::build_http_layers;
use super::shutdown::ShutdownController;

/// Upper bound on how long shutdown waits for in-flight extractions.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Manages the HTTP server lifecycle around a shared [`Extractor`].
pub struct NetworkModule {
    config: NetworkConfig,
    extractor: Arc<Extractor>,
    listener: Option<TcpListener>,
    shutdown: Arc<ShutdownController>,
}

impl NetworkModule {
    /// Creates the module without binding any port.
    #[must_use]
    pub fn new(config: NetworkConfig, extractor: Arc<Extractor>) -> Self {
        Self {
            config,
            extractor,
            listener: None,
            shutdown: Arc::new(ShutdownController::new()),
        }
    }

    #[must_use]
    pub fn shutdown_controller(&self) -> Arc<ShutdownController> {
        Arc::clone(&self.shutdown)
    }

    #[must_use]
    pub fn extractor(&self) -> Arc<Extractor> {
        Arc::clone(&self.extractor)
    }

    /// Assembles the axum router with all routes and middleware.
    ///
    /// Routes:
    /// - `<extract_path>` (any method) -- extraction endpoint
    /// - `GET /health` -- detailed health JSON
    /// - `GET /health/live` -- liveness probe
    /// - `GET /health/ready` -- readiness probe
    #[must_use]
    pub fn build_router(&self) -> Router {
        build_router(
            &self.config,
            Arc::clone(&self.extractor),
            Arc::clone(&self.shutdown),
        )
    }

    /// Binds the TCP listener to the configured host and port.
    ///
    /// Returns the bound port, which differs from the configured one when
    /// port 0 asks the OS to pick.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the address
    /// cannot be bound.
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        self.config.validate()?;

        let listener = TcpListener::bind(self.config.bind_addr()).await?;
        let port = listener.local_addr()?.port();

        info!("TCP listener bound to {}:{}", self.config.host, port);

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves requests until `shutdown` resolves, then drains in-flight
    /// extractions for up to 30 seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if `start()` was not called first or the server hits
    /// a fatal I/O error.
    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let Some(listener) = self.listener else {
            anyhow::bail!("start() must be called before serve()");
        };

        let router = build_router(
            &self.config,
            Arc::clone(&self.extractor),
            Arc::clone(&self.shutdown),
        );

        self.shutdown.set_ready();
        info!(
            patterns = self.extractor.pattern_count(),
            path = %self.config.extract_path,
            "serving extraction requests"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        drain(&self.shutdown).await;
        Ok(())
    }
}

fn build_router(
    config: &NetworkConfig,
    extractor: Arc<Extractor>,
    shutdown: Arc<ShutdownController>,
) -> Router {
    let state = AppState {
        extractor,
        shutdown,
        config: Arc::new(config.clone()),
        start_time: Instant::now(),
    };

    Router::new()
        .route(&config.extract_path, any(extract_handler))
        .route("/health", get(health_handler))
        .route("/health/live", get(liveness_handler))
        .route("/health/ready", get(readiness_handler))
        .layer(build_http_layers(config))
        .with_state(state)
}

async fn drain(shutdown: &ShutdownController) {
    shutdown.trigger_shutdown();

    if shutdown.wait_for_drain(DRAIN_TIMEOUT).await {
        info!("All in-flight requests drained");
    } else {
        warn!(
            in_flight = shutdown.in_flight_count(),
            "Drain timeout expired with in-flight requests remaining"
        );
    }
}
