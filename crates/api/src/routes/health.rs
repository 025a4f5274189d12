//! Liveness endpoint, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `ok`, or `degraded` when the database ping fails.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Live-results sockets currently subscribed to the event bus.
    pub live_subscribers: usize,
}

/// GET /health
///
/// Always 200; a failed database ping only downgrades `status`.
async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let db_healthy = match pollbox_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            false
        }
    };

    Json(HealthReport {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        live_subscribers: state.event_bus.subscriber_count(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
