//! Poll and vote operations behind the HTTP handlers.
//!
//! Every operation takes the caller as an explicit [`Session`] value. The
//! service checks ownership, runs the pure validators from `pollbox_core`,
//! talks to a [`PollStore`] and translates store failures into
//! [`crate::error::AppError`]s.
//!
//! Duplicate votes are caught twice: [`validate_vote`] rejects a user who
//! already has a vote on record, and the store's unique index rejects the
//! loser of a concurrent race that slipped past that check. Both surface as
//! `409 already voted`.

use std::sync::Arc;

use pollbox_core::error::CoreError;
use pollbox_core::poll::{Poll, PollDraft, Vote};
use pollbox_core::results::{create_poll_results, PollResults};
use pollbox_core::session::Session;
use pollbox_core::types::DbId;
use pollbox_core::vote::{validate_vote, VoteRejection};
use pollbox_db::models::poll::{CreatePoll, UpdatePoll};
use pollbox_db::models::vote::CreateVote;
use pollbox_db::repositories::vote_repo::VOTE_UNIQUE_CONSTRAINT;
use pollbox_db::store::{PollStore, StoreError};
use pollbox_events::{EventBus, PollEvent};

use crate::error::AppResult;

#[derive(Clone)]
pub struct PollService {
    store: Arc<dyn PollStore>,
    events: Arc<EventBus>,
}

impl PollService {
    pub fn new(store: Arc<dyn PollStore>, events: Arc<EventBus>) -> Self {
        Self { store, events }
    }

    /// Create a poll owned by the caller.
    pub async fn create(
        &self,
        question: &str,
        options: &[String],
        session: &Session,
    ) -> AppResult<Poll> {
        let draft = PollDraft::normalize(question, options)?;
        let poll = self
            .store
            .insert_poll(&CreatePoll::new(draft, session.user_id))
            .await?;

        tracing::info!(
            poll_id = poll.id,
            user_id = session.user_id,
            options = poll.options.len(),
            "Poll created"
        );
        Ok(poll)
    }

    pub async fn get(&self, poll_id: DbId) -> AppResult<Poll> {
        self.store
            .find_poll(poll_id)
            .await?
            .ok_or_else(|| CoreError::poll_not_found(poll_id).into())
    }

    /// Polls owned by the caller, newest first.
    pub async fn list_by_owner(&self, session: &Session) -> AppResult<Vec<Poll>> {
        Ok(self.store.list_polls_by_owner(session.user_id).await?)
    }

    /// Every poll, newest first. Admins only.
    pub async fn list_all(&self, session: &Session) -> AppResult<Vec<Poll>> {
        if !session.is_admin() {
            return Err(CoreError::forbidden("Admin role required").into());
        }
        Ok(self.store.list_polls().await?)
    }

    /// Replace a poll's question and options. Only the owner may do this.
    ///
    /// Existing votes keep their `option_index`; indexes that no longer
    /// address an option are ignored by the tally.
    pub async fn update(
        &self,
        poll_id: DbId,
        question: &str,
        options: &[String],
        session: &Session,
    ) -> AppResult<Poll> {
        let poll = self.get(poll_id).await?;
        if !session.owns(poll.user_id) {
            tracing::warn!(poll_id, user_id = session.user_id, "Rejected poll update by non-owner");
            return Err(CoreError::forbidden("Only the poll owner can edit this poll").into());
        }

        let draft = PollDraft::normalize(question, options)?;
        let updated = self
            .store
            .update_poll(poll_id, &UpdatePoll::from(draft))
            .await?
            .ok_or_else(|| CoreError::poll_not_found(poll_id))?;

        tracing::info!(poll_id, user_id = session.user_id, "Poll updated");
        self.events
            .publish(PollEvent::updated(poll_id).with_actor(Some(session.user_id)));
        Ok(updated)
    }

    /// Delete a poll and its votes. The owner or an admin may do this.
    pub async fn delete(&self, poll_id: DbId, session: &Session) -> AppResult<()> {
        let poll = self.get(poll_id).await?;
        if !session.owns(poll.user_id) && !session.is_admin() {
            tracing::warn!(poll_id, user_id = session.user_id, "Rejected poll delete");
            return Err(
                CoreError::forbidden("Only the poll owner or an admin can delete this poll").into(),
            );
        }

        if !self.store.delete_poll(poll_id).await? {
            return Err(CoreError::poll_not_found(poll_id).into());
        }

        tracing::info!(poll_id, user_id = session.user_id, "Poll deleted");
        self.events
            .publish(PollEvent::deleted(poll_id).with_actor(Some(session.user_id)));
        Ok(())
    }

    /// Record a vote. `session` is `None` for anonymous voters.
    ///
    /// A missing poll is reported before any problem with `option_index`.
    pub async fn cast_vote(
        &self,
        poll_id: DbId,
        option_index: i64,
        session: Option<&Session>,
    ) -> AppResult<Vote> {
        let poll = self.get(poll_id).await?;
        let option_index = i32::try_from(option_index)
            .map_err(|_| CoreError::from(VoteRejection::InvalidOption))?;
        let user_id = session.map(|s| s.user_id);

        let existing_vote = match user_id {
            Some(uid) => self
                .store
                .find_user_vote(poll_id, uid)
                .await?
                .map(|v| v.option_index),
            None => None,
        };
        validate_vote(option_index, &poll, existing_vote).map_err(CoreError::from)?;

        let input = CreateVote {
            poll_id,
            user_id,
            option_index,
        };
        let vote = match self.store.insert_vote(&input).await {
            Ok(vote) => vote,
            Err(StoreError::UniqueViolation { constraint })
                if constraint == VOTE_UNIQUE_CONSTRAINT =>
            {
                tracing::info!(poll_id, ?user_id, "Concurrent duplicate vote rejected by store");
                return Err(CoreError::from(VoteRejection::AlreadyVoted).into());
            }
            // The poll was deleted between the lookup and the insert.
            Err(StoreError::ForeignKeyViolation { .. }) => {
                return Err(CoreError::poll_not_found(poll_id).into())
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(poll_id, ?user_id, option_index, "Vote recorded");
        self.events
            .publish(PollEvent::vote_cast(poll_id).with_actor(user_id));
        Ok(vote)
    }

    /// Current results for a poll as seen by `session` (`None` = anonymous).
    pub async fn results(&self, poll_id: DbId, session: Option<&Session>) -> AppResult<PollResults> {
        let poll = self.get(poll_id).await?;
        let votes = self.store.list_votes(poll_id).await?;
        Ok(create_poll_results(
            &poll,
            &votes,
            session.map(|s| s.user_id),
        ))
    }
}
