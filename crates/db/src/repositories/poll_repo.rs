//! Repository for the `polls` table.

use pollbox_core::types::DbId;
use sqlx::PgPool;

use crate::models::poll::{CreatePoll, Poll, UpdatePoll};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, question, options, user_id, created_at, updated_at";

/// Provides CRUD operations for polls.
pub struct PollRepo;

impl PollRepo {
    /// Insert a new poll, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePoll) -> Result<Poll, sqlx::Error> {
        let query = format!(
            "INSERT INTO polls (question, options, user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Poll>(&query)
            .bind(&input.question)
            .bind(&input.options)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a poll by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Poll>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM polls WHERE id = $1");
        sqlx::query_as::<_, Poll>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List polls owned by `user_id`, most recently created first.
    pub async fn list_by_owner(pool: &PgPool, user_id: DbId) -> Result<Vec<Poll>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM polls WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Poll>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List every poll, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Poll>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM polls ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Poll>(&query).fetch_all(pool).await
    }

    /// Replace question and options. Existing votes are left untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePoll,
    ) -> Result<Option<Poll>, sqlx::Error> {
        let query = format!(
            "UPDATE polls SET question = $2, options = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Poll>(&query)
            .bind(id)
            .bind(&input.question)
            .bind(&input.options)
            .fetch_optional(pool)
            .await
    }

    /// Delete a poll by ID; its votes go with it via `ON DELETE CASCADE`.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM polls WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
