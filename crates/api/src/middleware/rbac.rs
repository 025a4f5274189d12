//! Role-based access control (RBAC) extractors.
//!
//! The role comes from the bearer token; it is never looked up locally.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pollbox_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = <AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state).await?;
        if !user.session().is_admin() {
            tracing::debug!(user_id = user.user_id, role = %user.role, "Admin role required");
            return Err(CoreError::forbidden("Admin role required").into());
        }
        Ok(RequireAdmin(user))
    }
}
