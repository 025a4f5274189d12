//! In-process change notifications for polls.
//!
//! - [`EventBus`]: publish/subscribe hub backed by `tokio::sync::broadcast`.
//! - [`PollEvent`]: what changed, and on which poll.
//!
//! Live-results connections subscribe here and re-read results from the
//! store when an event for their poll arrives.

pub mod bus;

pub use bus::{EventBus, PollEvent, PollEventKind};
