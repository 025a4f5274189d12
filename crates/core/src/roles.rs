//! Well-known role name constants.
//!
//! Roles are asserted by the identity provider inside the access token;
//! this service never stores them.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
