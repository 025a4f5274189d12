//! The authenticated caller, passed explicitly into every service call.

use serde::{Deserialize, Serialize};

use crate::roles::ROLE_ADMIN;
use crate::types::DbId;

/// Identity of the caller for a single request.
///
/// Built by the HTTP layer from a verified access token. Anonymous callers
/// are represented as `Option<&Session>::None` rather than a sentinel value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: DbId,
    pub role: String,
}

impl Session {
    pub fn new(user_id: DbId, role: impl Into<String>) -> Self {
        Self {
            user_id,
            role: role.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Whether this caller owns a record with the given owner id.
    pub fn owns(&self, owner_id: DbId) -> bool {
        self.user_id == owner_id
    }
}
