//! Access-token verification.
//!
//! Tokens are issued by the external identity provider, which shares the
//! HS256 signing secret with this service.

pub mod jwt;
