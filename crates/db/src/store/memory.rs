//! In-process [`PollStore`] with the same constraint semantics as the
//! Postgres schema. Used by service tests and local experiments.

use async_trait::async_trait;
use chrono::Utc;
use pollbox_core::types::DbId;
use tokio::sync::Mutex;

use super::{PollStore, StoreError, StoreResult};
use crate::models::poll::{CreatePoll, Poll, UpdatePoll};
use crate::models::vote::{CreateVote, Vote};
use crate::repositories::vote_repo::VOTE_UNIQUE_CONSTRAINT;

#[derive(Debug, Default)]
struct Tables {
    polls: Vec<Poll>,
    votes: Vec<Vote>,
    next_poll_id: DbId,
    next_vote_id: DbId,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut polls: Vec<Poll>) -> Vec<Poll> {
    polls.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
    polls
}

#[async_trait]
impl PollStore for MemoryStore {
    async fn insert_poll(&self, input: &CreatePoll) -> StoreResult<Poll> {
        let mut tables = self.tables.lock().await;
        tables.next_poll_id += 1;
        let now = Utc::now();
        let poll = Poll {
            id: tables.next_poll_id,
            question: input.question.clone(),
            options: input.options.clone(),
            user_id: input.user_id,
            created_at: now,
            updated_at: now,
        };
        tables.polls.push(poll.clone());
        Ok(poll)
    }

    async fn find_poll(&self, id: DbId) -> StoreResult<Option<Poll>> {
        let tables = self.tables.lock().await;
        Ok(tables.polls.iter().find(|p| p.id == id).cloned())
    }

    async fn list_polls_by_owner(&self, user_id: DbId) -> StoreResult<Vec<Poll>> {
        let tables = self.tables.lock().await;
        let owned = tables
            .polls
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(owned))
    }

    async fn list_polls(&self) -> StoreResult<Vec<Poll>> {
        let tables = self.tables.lock().await;
        Ok(newest_first(tables.polls.clone()))
    }

    async fn update_poll(&self, id: DbId, input: &UpdatePoll) -> StoreResult<Option<Poll>> {
        let mut tables = self.tables.lock().await;
        let Some(poll) = tables.polls.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        poll.question = input.question.clone();
        poll.options = input.options.clone();
        poll.updated_at = Utc::now();
        Ok(Some(poll.clone()))
    }

    async fn delete_poll(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.polls.len();
        tables.polls.retain(|p| p.id != id);
        if tables.polls.len() == before {
            return Ok(false);
        }
        tables.votes.retain(|v| v.poll_id != id);
        Ok(true)
    }

    async fn list_votes(&self, poll_id: DbId) -> StoreResult<Vec<Vote>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .votes
            .iter()
            .filter(|v| v.poll_id == poll_id)
            .cloned()
            .collect())
    }

    async fn find_user_vote(&self, poll_id: DbId, user_id: DbId) -> StoreResult<Option<Vote>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .votes
            .iter()
            .find(|v| v.poll_id == poll_id && v.user_id == Some(user_id))
            .cloned())
    }

    async fn insert_vote(&self, input: &CreateVote) -> StoreResult<Vote> {
        let mut tables = self.tables.lock().await;

        if !tables.polls.iter().any(|p| p.id == input.poll_id) {
            return Err(StoreError::ForeignKeyViolation {
                constraint: "votes_poll_id_fkey".to_string(),
            });
        }
        if input.user_id.is_some()
            && tables
                .votes
                .iter()
                .any(|v| v.poll_id == input.poll_id && v.user_id == input.user_id)
        {
            return Err(StoreError::UniqueViolation {
                constraint: VOTE_UNIQUE_CONSTRAINT.to_string(),
            });
        }

        tables.next_vote_id += 1;
        let vote = Vote {
            id: tables.next_vote_id,
            poll_id: input.poll_id,
            user_id: input.user_id,
            option_index: input.option_index,
            created_at: Utc::now(),
        };
        tables.votes.push(vote.clone());
        Ok(vote)
    }
}
