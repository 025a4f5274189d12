//! Request handlers for polls, votes and admin listings.
//!
//! Handlers extract the caller, hand an explicit session to
//! [`crate::service::PollService`] and wrap the result in
//! [`crate::response::DataResponse`].

pub mod admin;
pub mod polls;
pub mod votes;
