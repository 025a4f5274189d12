//! Poll and vote records plus poll input validation.
//!
//! A poll's `options` sequence defines the option index space: index `i`
//! refers to `options[i]` for the lifetime of that version of the poll.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Minimum number of options a poll must offer.
pub const MIN_OPTIONS: usize = 2;

/// Message returned for any malformed poll draft.
pub const DRAFT_REQUIREMENTS: &str = "question and at least 2 options are required";

/// A poll row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Poll {
    pub id: DbId,
    pub question: String,
    pub options: Vec<String>,
    /// Owner of the poll.
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Poll {
    /// Whether `option_index` addresses one of this poll's options.
    pub fn is_valid_option(&self, option_index: i32) -> bool {
        usize::try_from(option_index).is_ok_and(|i| i < self.options.len())
    }
}

/// A single vote row. `user_id` is `None` for anonymous votes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Vote {
    pub id: DbId,
    pub poll_id: DbId,
    pub user_id: Option<DbId>,
    pub option_index: i32,
    pub created_at: Timestamp,
}

/// Validated question and options for creating or replacing a poll.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct PollDraft {
    #[validate(length(min = 1))]
    pub question: String,
    /// Must hold at least [`MIN_OPTIONS`] entries.
    #[validate(length(min = 2))]
    pub options: Vec<String>,
}

impl PollDraft {
    /// Trim the question and options, drop blank options, then validate.
    pub fn normalize(question: &str, options: &[String]) -> Result<Self, CoreError> {
        let draft = Self {
            question: question.trim().to_string(),
            options: options
                .iter()
                .map(|o| o.trim())
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
        };

        draft
            .validate()
            .map_err(|_| CoreError::Validation(DRAFT_REQUIREMENTS.to_string()))?;
        Ok(draft)
    }
}
