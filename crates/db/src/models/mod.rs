//! Row structs and insert/update DTOs.
//!
//! Row structs live in `pollbox_core::poll` (with `FromRow` enabled by the
//! `sqlx` feature) and are re-exported here next to their DTOs.

pub mod poll;
pub mod vote;
