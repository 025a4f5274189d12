//! Per-option vote counting and percentage calculation.
//!
//! Everything here is pure: the inputs are snapshots loaded by the caller.

use serde::{Deserialize, Serialize};

use crate::poll::{Poll, Vote};

/// Tally for a single option, index-aligned with `Poll::options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResult {
    pub option_index: usize,
    pub option_text: String,
    pub vote_count: i64,
    /// Share of all counted votes, rounded half-up to a whole percent.
    pub percentage: u32,
}

/// Count votes per option.
///
/// Returns one counter per entry in `poll.options`. Votes whose
/// `option_index` falls outside the option range are skipped, not reported.
pub fn count_votes_by_option(poll: &Poll, votes: &[Vote]) -> Vec<i64> {
    let mut counts = vec![0i64; poll.options.len()];
    for vote in votes {
        if let Some(slot) = usize::try_from(vote.option_index)
            .ok()
            .and_then(|i| counts.get_mut(i))
        {
            *slot += 1;
        }
    }
    counts
}

/// Sum of all per-option counters.
pub fn total_votes(vote_counts: &[i64]) -> i64 {
    vote_counts.iter().sum()
}

/// Build the per-option results for `poll`.
///
/// A missing counter is treated as zero. With no votes at all every
/// percentage is zero. Percentages are rounded half-up independently, so
/// they may sum to 99 or 101.
pub fn calculate_vote_results(poll: &Poll, vote_counts: &[i64]) -> Vec<VoteResult> {
    let total = total_votes(vote_counts);

    poll.options
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let vote_count = vote_counts.get(i).copied().unwrap_or(0);
            VoteResult {
                option_index: i,
                option_text: text.clone(),
                vote_count,
                percentage: percentage(vote_count, total),
            }
        })
        .collect()
}

/// `round(count / total * 100)` with halves rounded up, in integer math.
fn percentage(count: i64, total: i64) -> u32 {
    if total <= 0 || count <= 0 {
        return 0;
    }
    let pct = (count * 200 + total) / (total * 2);
    u32::try_from(pct).unwrap_or(100)
}
