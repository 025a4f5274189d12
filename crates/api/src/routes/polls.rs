//! Route definitions for the `/polls` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{polls, votes};
use crate::state::AppState;
use crate::ws;

/// Routes mounted at `/polls`.
///
/// ```text
/// GET    /                -> list_my_polls    (auth required)
/// POST   /                -> create_poll      (auth required)
/// GET    /{id}            -> get_poll
/// PUT    /{id}            -> update_poll      (owner)
/// DELETE /{id}            -> delete_poll      (owner or admin)
/// POST   /{id}/vote       -> cast_vote        (optional auth)
/// GET    /{id}/results    -> get_results      (optional auth)
/// GET    /{id}/live       -> live_results     (WebSocket, optional auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(polls::list_my_polls).post(polls::create_poll))
        .route(
            "/{id}",
            get(polls::get_poll)
                .put(polls::update_poll)
                .delete(polls::delete_poll),
        )
        .route("/{id}/vote", post(votes::cast_vote))
        .route("/{id}/results", get(votes::get_results))
        .route("/{id}/live", get(ws::live_results))
}
