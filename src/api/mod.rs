//! REST API for cost calculation.
//!
//! Provides two endpoints:
//! - `GET /tariff`: the default tariff used when a request has none
//! - `POST /calculate`: itemized cost for a total or a set of meters

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::config::DefaultsConfig;
use crate::tariff::Tariff;

pub use types::{CalculateBody, CalculateResponse, ErrorResponse, TariffOverride};

/// Immutable application state shared across all request handlers.
///
/// Built once from the resolved configuration and wrapped in `Arc`; no
/// locks are needed since all data is read-only.
pub struct AppState {
    /// Tariff applied when a request carries no override.
    pub tariff: Tariff,
    /// Period and VAT defaults for requests that omit them.
    pub defaults: DefaultsConfig,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tariff", get(handlers::get_tariff))
        .route("/calculate", post(handlers::post_calculate))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
