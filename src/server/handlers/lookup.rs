//! Website lookup handler.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::super::types::{AppState, ErrorResponse};
use crate::app::normalize;
use crate::error_handling::ProbeError;

/// `GET /url_whois/api/v1.0/{*url}`
///
/// The captured path is the website as the caller typed it, usually followed
/// by the route's own trailing `/`. Results are cached under the normalized
/// hostname, so `http://www.example.com` and `example.com` share one entry.
pub async fn lookup_handler(State(state): State<AppState>, Path(url): Path<String>) -> Response {
    let raw = url.strip_suffix('/').unwrap_or(&url);
    let key = normalize(raw);
    if key.is_empty() {
        return StatusCode::NOT_FOUND.into_response();
    }

    let lookup = state
        .cache
        .get_or_probe(&key, state.prober.probe(raw));

    match tokio::time::timeout(state.probe_timeout, lookup).await {
        Ok(Ok(result)) => Json(result.as_ref()).into_response(),
        Ok(Err(e)) => {
            log::warn!("Lookup for {} failed ({}): {}", key, e.kind(), e);
            let status = if e.is_timeout() {
                StatusCode::GATEWAY_TIMEOUT
            } else {
                StatusCode::BAD_GATEWAY
            };
            error_response(status, &e)
        }
        Err(_) => {
            let e = ProbeError::Timeout {
                stage: "probe",
                target: key,
                secs: state.probe_timeout.as_secs(),
            };
            log::warn!("{}", e);
            error_response(StatusCode::GATEWAY_TIMEOUT, &e)
        }
    }
}

fn error_response(status: StatusCode, e: &ProbeError) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}
