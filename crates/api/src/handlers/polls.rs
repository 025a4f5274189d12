//! Handlers for the `/polls` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pollbox_core::types::DbId;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /polls` and `PUT /polls/{id}`.
///
/// Blank options are dropped before validation.
#[derive(Debug, Deserialize)]
pub struct PollRequest {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
}

/// POST /api/v1/polls
///
/// Create a poll owned by the caller. Returns 201 Created.
pub async fn create_poll(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<PollRequest>,
) -> AppResult<impl IntoResponse> {
    let poll = state
        .polls
        .create(&input.question, &input.options, &user.session())
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: poll })))
}

/// GET /api/v1/polls
///
/// List the caller's own polls, newest first.
pub async fn list_my_polls(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let polls = state.polls.list_by_owner(&user.session()).await?;
    Ok(Json(DataResponse { data: polls }))
}

/// GET /api/v1/polls/{id}
pub async fn get_poll(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let poll = state.polls.get(id).await?;
    Ok(Json(DataResponse { data: poll }))
}

/// PUT /api/v1/polls/{id}
///
/// Replace the question and options. Owner only.
pub async fn update_poll(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<PollRequest>,
) -> AppResult<impl IntoResponse> {
    let poll = state
        .polls
        .update(id, &input.question, &input.options, &user.session())
        .await?;
    Ok(Json(DataResponse { data: poll }))
}

/// DELETE /api/v1/polls/{id}
///
/// Owner or admin. Returns 204 No Content.
pub async fn delete_poll(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.polls.delete(id, &user.session()).await?;
    Ok(StatusCode::NO_CONTENT)
}
