//! Handlers for casting votes and reading results.
//!
//! Both endpoints accept anonymous callers. A malformed bearer token is
//! still rejected with 401 rather than treated as anonymous.

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

/// Request body for `POST /polls/{id}/vote`.
///
/// Any JSON integer is accepted here; range checks happen against the poll.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    #[serde(alias = "optionIndex")]
    pub option_index: i64,
}

/// POST /api/v1/polls/{id}/vote
///
/// Returns 201 with the stored vote, 400 for an out-of-range option,
/// 404 for a missing poll and 409 if the caller already voted.
pub async fn cast_vote(
    user: Option<AuthUser>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<VoteRequest>,
) -> AppResult<impl IntoResponse> {
    let session = user.map(|u| u.session());
    let vote = state
        .polls
        .cast_vote(id, input.option_index, session.as_ref())
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: vote })))
}

/// GET /api/v1/polls/{id}/results
///
/// Per-option counts and percentages, plus the caller's own vote if any.
pub async fn get_results(
    user: Option<AuthUser>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = user.map(|u| u.session());
    let results = state.polls.results(id, session.as_ref()).await?;
    Ok(Json(DataResponse { data: results }))
}
