//! Extraction endpoint: the request body goes in, labeled matches come back
//! as a JSON object.

use std::time::Instant;

use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::field::Empty;
use tracing::{debug, error, info_span};

use super::AppState;

/// Failures while handling one extract request.
///
/// Both map to a 500 with a generic body; details only go to the log.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to read request body: {0}")]
    ReadBody(#[source] axum::Error),
    #[error("failed to serialize extraction: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ExtractError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ReadBody(_) | Self::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            Self::ReadBody(_) => "failed to read content",
            Self::Serialize(_) => "failed to produce the proper output",
        }
    }
}

impl IntoResponse for ExtractError {
    fn into_response(self) -> Response {
        error!(error = %self, "extract request failed");
        metrics::counter!("extractor_requests_total", "outcome" => "error").increment(1);
        (self.status(), self.public_message()).into_response()
    }
}

/// Reads the whole body as text, runs every pattern over it, and answers
/// with `{"label": ["match", ...]}`.
///
/// Bodies that are not valid UTF-8 are decoded lossily. The body is read in
/// full unless `max_body_bytes` is set; a body over that cap, or one that
/// fails mid-stream, is a read failure.
///
/// # Errors
///
/// Returns [`ExtractError`] when the body cannot be read or the result
/// cannot be serialized.
pub async fn extract_handler(
    State(state): State<AppState>,
    body: Body,
) -> Result<Response, ExtractError> {
    let _in_flight = state.shutdown.in_flight_guard();

    let bytes = to_bytes(body, state.config.body_limit())
        .await
        .map_err(ExtractError::ReadBody)?;
    let text = String::from_utf8_lossy(&bytes);

    let span = info_span!(
        "extract",
        bytes = bytes.len(),
        labels = Empty,
        matches = Empty,
        duration_ms = Empty,
    );

    let payload = span.in_scope(|| -> Result<Vec<u8>, ExtractError> {
        let start = Instant::now();
        let extraction = state.extractor.extract(&text);
        let payload = serde_json::to_vec(&extraction)?;
        let elapsed = start.elapsed();

        span.record("labels", extraction.len());
        span.record("matches", extraction.match_count());
        span.record(
            "duration_ms",
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        );
        debug!("extraction complete");

        metrics::histogram!("extractor_extract_duration_seconds").record(elapsed.as_secs_f64());
        metrics::counter!("extractor_matches_total").increment(extraction.match_count() as u64);
        Ok(payload)
    })?;

    metrics::counter!("extractor_requests_total", "outcome" => "ok").increment(1);

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        payload,
    )
        .into_response())
}
