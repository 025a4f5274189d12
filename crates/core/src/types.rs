//! Primitive aliases shared by every pollbox crate.

/// Poll and vote ids; both tables use BIGSERIAL keys.
pub type DbId = i64;

/// Row timestamps, always stored and compared in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
