//! Composes tallies and the caller's prior vote into one results view.

use serde::{Deserialize, Serialize};

use crate::poll::{Poll, Vote};
use crate::tally::{calculate_vote_results, count_votes_by_option, total_votes, VoteResult};
use crate::types::DbId;
use crate::vote::get_user_vote;

/// A poll together with its per-option counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollWithVotes {
    #[serde(flatten)]
    pub poll: Poll,
    pub total_votes: i64,
    /// Index-aligned with `poll.options`.
    pub vote_counts: Vec<i64>,
}

/// Everything a results page needs for one poll and one viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollResults {
    pub poll: PollWithVotes,
    pub results: Vec<VoteResult>,
    pub total_votes: i64,
    pub has_user_voted: bool,
    pub user_vote: Option<i32>,
}

/// Build [`PollResults`] for `poll` as seen by `user_id` (`None` = anonymous).
pub fn create_poll_results(poll: &Poll, votes: &[Vote], user_id: Option<DbId>) -> PollResults {
    let vote_counts = count_votes_by_option(poll, votes);
    let results = calculate_vote_results(poll, &vote_counts);
    let total = total_votes(&vote_counts);
    let user_vote = get_user_vote(votes, user_id);

    PollResults {
        poll: PollWithVotes {
            poll: poll.clone(),
            total_votes: total,
            vote_counts,
        },
        results,
        total_votes: total,
        has_user_voted: user_vote.is_some(),
        user_vote,
    }
}
