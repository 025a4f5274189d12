//! One-vote-per-user checks.
//!
//! These checks are an early rejection path only. Two requests can both
//! pass [`validate_vote`] before either inserts; the store's unique index
//! on `(poll_id, user_id)` decides which one wins.

use crate::error::CoreError;
use crate::poll::{Poll, Vote};
use crate::types::DbId;

/// Message for a vote whose option index is out of range.
pub const INVALID_OPTION: &str = "invalid option";

/// Message for a second vote by the same user.
pub const ALREADY_VOTED: &str = "already voted";

/// Why a vote was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VoteRejection {
    #[error("invalid option")]
    InvalidOption,
    #[error("already voted")]
    AlreadyVoted,
}

impl From<VoteRejection> for CoreError {
    fn from(rejection: VoteRejection) -> Self {
        match rejection {
            VoteRejection::InvalidOption => CoreError::Validation(INVALID_OPTION.to_string()),
            VoteRejection::AlreadyVoted => CoreError::Conflict(ALREADY_VOTED.to_string()),
        }
    }
}

/// The option index `user_id` already voted for, if any.
///
/// Anonymous callers (`None`) never have a prior vote. If the data holds
/// several votes for one user, the first in slice order is returned.
pub fn get_user_vote(votes: &[Vote], user_id: Option<DbId>) -> Option<i32> {
    let user_id = user_id?;
    votes
        .iter()
        .find(|v| v.user_id == Some(user_id))
        .map(|v| v.option_index)
}

/// Check a new vote against the poll's options and the caller's prior vote.
///
/// Option bounds are checked first, so an out-of-range index is reported as
/// [`VoteRejection::InvalidOption`] even for a user who already voted.
pub fn validate_vote(
    option_index: i32,
    poll: &Poll,
    existing_vote: Option<i32>,
) -> Result<(), VoteRejection> {
    if !poll.is_valid_option(option_index) {
        return Err(VoteRejection::InvalidOption);
    }
    if existing_vote.is_some() {
        return Err(VoteRejection::AlreadyVoted);
    }
    Ok(())
}
