//! [`PollStore`] backed by PostgreSQL through the repositories.

use async_trait::async_trait;
use pollbox_core::types::DbId;

use super::{PollStore, StoreError, StoreResult};
use crate::models::poll::{CreatePoll, Poll, UpdatePoll};
use crate::models::vote::{CreateVote, Vote};
use crate::repositories::{PollRepo, VoteRepo};
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl PollStore for PgStore {
    async fn insert_poll(&self, input: &CreatePoll) -> StoreResult<Poll> {
        Ok(PollRepo::create(&self.pool, input).await?)
    }

    async fn find_poll(&self, id: DbId) -> StoreResult<Option<Poll>> {
        Ok(PollRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_polls_by_owner(&self, user_id: DbId) -> StoreResult<Vec<Poll>> {
        Ok(PollRepo::list_by_owner(&self.pool, user_id).await?)
    }

    async fn list_polls(&self) -> StoreResult<Vec<Poll>> {
        Ok(PollRepo::list(&self.pool).await?)
    }

    async fn update_poll(&self, id: DbId, input: &UpdatePoll) -> StoreResult<Option<Poll>> {
        Ok(PollRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_poll(&self, id: DbId) -> StoreResult<bool> {
        Ok(PollRepo::delete(&self.pool, id).await?)
    }

    async fn list_votes(&self, poll_id: DbId) -> StoreResult<Vec<Vote>> {
        Ok(VoteRepo::list_by_poll(&self.pool, poll_id).await?)
    }

    async fn find_user_vote(&self, poll_id: DbId, user_id: DbId) -> StoreResult<Option<Vote>> {
        Ok(VoteRepo::find_by_poll_and_user(&self.pool, poll_id, user_id).await?)
    }

    async fn insert_vote(&self, input: &CreateVote) -> StoreResult<Vote> {
        VoteRepo::create(&self.pool, input).await.map_err(|e| {
            let err = StoreError::from(e);
            if !matches!(err, StoreError::Database(_)) {
                tracing::debug!(
                    poll_id = input.poll_id,
                    user_id = ?input.user_id,
                    error = %err,
                    "Vote insert rejected by constraint"
                );
            }
            err
        })
    }
}
