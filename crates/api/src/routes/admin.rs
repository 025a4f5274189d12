//! Route definitions for the `/admin` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET /polls   -> list_all_polls
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/polls", get(admin::list_all_polls))
}
