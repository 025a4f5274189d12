//! Vote model and DTOs.

use pollbox_core::types::DbId;

pub use pollbox_core::poll::Vote;

/// DTO for inserting a vote. `user_id` is `None` for anonymous voters.
#[derive(Debug, Clone, Copy)]
pub struct CreateVote {
    pub poll_id: DbId,
    pub user_id: Option<DbId>,
    pub option_index: i32,
}
