//! Domain failures. The API layer maps each variant to one HTTP status.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The addressed row does not exist (404).
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed poll draft or vote (400).
    #[error("invalid input: {0}")]
    Validation(String),

    /// The write would break a uniqueness rule, e.g. a second vote (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// No session, or the bearer token could not be verified (401).
    #[error("unauthenticated: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to touch this poll (403).
    #[error("forbidden: {0}")]
    Forbidden(String),
}

impl CoreError {
    pub fn poll_not_found(id: DbId) -> Self {
        CoreError::NotFound { entity: "Poll", id }
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        CoreError::Forbidden(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_not_found_display() {
        assert_eq!(CoreError::poll_not_found(12).to_string(), "Poll 12 does not exist");
    }
}
