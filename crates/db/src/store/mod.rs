//! The data-store boundary used by the poll service.
//!
//! [`PollStore`] is the query/insert/delete surface the service relies on.
//! Implementations must enforce three rules themselves: votes are removed
//! with their poll, a poll id referenced by a new vote must exist, and at
//! most one vote exists per `(poll_id, user_id)` for non-null `user_id`.

use async_trait::async_trait;
use pollbox_core::types::DbId;

use crate::models::poll::{CreatePoll, Poll, UpdatePoll};
use crate::models::vote::{CreateVote, Vote};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// PostgreSQL SQLSTATE for `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for `foreign_key_violation`.
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Failure reported by a [`PollStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// A referenced row does not exist (e.g. a vote for a deleted poll).
    #[error("foreign key constraint violated: {constraint}")]
    ForeignKeyViolation { constraint: String },

    /// Any other database failure.
    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            match db_err.code().as_deref() {
                Some(PG_UNIQUE_VIOLATION) => return StoreError::UniqueViolation { constraint },
                Some(PG_FOREIGN_KEY_VIOLATION) => {
                    return StoreError::ForeignKeyViolation { constraint }
                }
                _ => {}
            }
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations for polls and votes.
#[async_trait]
pub trait PollStore: Send + Sync {
    async fn insert_poll(&self, input: &CreatePoll) -> StoreResult<Poll>;

    async fn find_poll(&self, id: DbId) -> StoreResult<Option<Poll>>;

    /// Polls owned by `user_id`, newest first.
    async fn list_polls_by_owner(&self, user_id: DbId) -> StoreResult<Vec<Poll>>;

    /// Every poll, newest first.
    async fn list_polls(&self) -> StoreResult<Vec<Poll>>;

    /// Returns `None` if the poll does not exist.
    async fn update_poll(&self, id: DbId, input: &UpdatePoll) -> StoreResult<Option<Poll>>;

    /// Delete a poll and all of its votes. Returns `true` if the poll existed.
    async fn delete_poll(&self, id: DbId) -> StoreResult<bool>;

    /// All votes for a poll in insertion order.
    async fn list_votes(&self, poll_id: DbId) -> StoreResult<Vec<Vote>>;

    async fn find_user_vote(&self, poll_id: DbId, user_id: DbId) -> StoreResult<Option<Vote>>;

    /// Insert a vote, failing with [`StoreError::UniqueViolation`] on a
    /// second vote by the same signed-in user.
    async fn insert_vote(&self, input: &CreateVote) -> StoreResult<Vote>;
}
