//! Pollbox API server library.
//!
//! Exposes config, state, the poll service, error handling, routes and the
//! live-results WebSocket so integration tests and the binary entrypoint
//! share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod service;
pub mod state;
pub mod ws;
