pub mod admin;
pub mod health;
pub mod polls;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /polls                       list own, create (auth required)
/// /polls/{id}                  get (public), update (owner), delete (owner or admin)
/// /polls/{id}/vote             cast vote (optional auth)
/// /polls/{id}/results          results (optional auth)
/// /polls/{id}/live             live results WebSocket (optional auth)
///
/// /admin/polls                 list all polls (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/polls", polls::router())
        .nest("/admin", admin::router())
}
