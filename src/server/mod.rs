//! HTTP front-end.
//!
//! Provides two endpoints:
//! - `/` - plain-text usage banner
//! - `/url_whois/api/v1.0/{url}` - JSON probe result for a website, cached

mod handlers;
mod types;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use crate::app::shutdown_signal;
use crate::config::API_PREFIX;
use handlers::{banner_handler, lookup_handler};
pub use types::{AppState, ErrorResponse};

/// Builds the router with every route wired to `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(banner_handler))
        .route(&format!("{}/{{*url}}", API_PREFIX), get(lookup_handler))
        .with_state(state)
}

/// Serves `state` on an already-bound listener until Ctrl-C or SIGTERM.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), anyhow::Error> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("URL WHOIS API listening on http://{}/", addr);
        log::info!("  - Lookup: http://{}{}/<url>/", addr, API_PREFIX);
    }

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;

    log::info!("HTTP server stopped");
    Ok(())
}
