//! Shared response envelope for API handlers.
//!
//! Successful JSON responses are wrapped as `{ "data": ... }`. Errors use the
//! `{ "error", "code" }` shape rendered by [`crate::error::AppError`].

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: poll }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
