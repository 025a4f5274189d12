//! Handlers for the `/admin` resource.
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/polls
///
/// List every poll regardless of owner, newest first.
pub async fn list_all_polls(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let polls = state.polls.list_all(&admin.session()).await?;
    tracing::debug!(user_id = admin.user_id, count = polls.len(), "Admin listed polls");
    Ok(Json(DataResponse { data: polls }))
}
