//! Pure domain logic for pollbox: poll validation, vote tallying,
//! duplicate-vote checks and result aggregation.
//!
//! Nothing in this crate performs I/O.

pub mod error;
pub mod poll;
pub mod results;
pub mod roles;
pub mod session;
pub mod tally;
pub mod types;
pub mod vote;
