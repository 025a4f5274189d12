//! Repository for the `votes` table.

use pollbox_core::types::DbId;
use sqlx::PgPool;

use crate::models::vote::{CreateVote, Vote};

const COLUMNS: &str = "id, poll_id, user_id, option_index, created_at";

/// Name of the partial unique index enforcing one vote per signed-in user.
pub const VOTE_UNIQUE_CONSTRAINT: &str = "uq_votes_poll_id_user_id";

pub struct VoteRepo;

impl VoteRepo {
    /// Insert a vote.
    ///
    /// A second vote by the same non-null `user_id` on the same poll fails
    /// with a unique violation on [`VOTE_UNIQUE_CONSTRAINT`].
    pub async fn create(pool: &PgPool, input: &CreateVote) -> Result<Vote, sqlx::Error> {
        let query = format!(
            "INSERT INTO votes (poll_id, user_id, option_index)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(input.poll_id)
            .bind(input.user_id)
            .bind(input.option_index)
            .fetch_one(pool)
            .await
    }

    /// All votes for a poll in insertion order.
    pub async fn list_by_poll(pool: &PgPool, poll_id: DbId) -> Result<Vec<Vote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM votes WHERE poll_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Vote>(&query)
            .bind(poll_id)
            .fetch_all(pool)
            .await
    }

    /// The vote `user_id` cast on `poll_id`, if any.
    pub async fn find_by_poll_and_user(
        pool: &PgPool,
        poll_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Vote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM votes WHERE poll_id = $1 AND user_id = $2 ORDER BY id ASC LIMIT 1"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(poll_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
