//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod poll_repo;
pub mod vote_repo;

pub use poll_repo::PollRepo;
pub use vote_repo::VoteRepo;
