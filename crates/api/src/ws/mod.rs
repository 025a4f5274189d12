//! WebSocket endpoints.
//!
//! Live results sockets subscribe to the event bus and push fresh
//! [`pollbox_core::results::PollResults`] snapshots for a single poll.

mod live;

pub use live::{live_results, LiveMessage};
