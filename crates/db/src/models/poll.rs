//! Poll model and DTOs.

use pollbox_core::poll::PollDraft;
use pollbox_core::types::DbId;

pub use pollbox_core::poll::Poll;

/// DTO for inserting a poll. Built from an already validated [`PollDraft`].
#[derive(Debug, Clone)]
pub struct CreatePoll {
    pub question: String,
    pub options: Vec<String>,
    pub user_id: DbId,
}

impl CreatePoll {
    pub fn new(draft: PollDraft, user_id: DbId) -> Self {
        Self {
            question: draft.question,
            options: draft.options,
            user_id,
        }
    }
}

/// DTO for replacing a poll's question and options wholesale.
#[derive(Debug, Clone)]
pub struct UpdatePoll {
    pub question: String,
    pub options: Vec<String>,
}

impl From<PollDraft> for UpdatePoll {
    fn from(draft: PollDraft) -> Self {
        Self {
            question: draft.question,
            options: draft.options,
        }
    }
}
