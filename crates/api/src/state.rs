use std::sync::Arc;

use crate::config::ServerConfig;
use crate::service::PollService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used directly only by the health check.
    pub pool: pollbox_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Poll and vote operations.
    pub polls: PollService,
    /// Change notifications feeding live-results sockets.
    pub event_bus: Arc<pollbox_events::EventBus>,
}
