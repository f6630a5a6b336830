//! Timestamp utilities
//!
//! Every timestamp in the store is a UTC millisecond epoch (`i64`).

use chrono::{DateTime, Utc};

/// Milliseconds since the Unix epoch, UTC
pub type EpochMillis = i64;

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Get current UTC timestamp as epoch milliseconds
pub fn now_millis() -> EpochMillis {
    now().timestamp_millis()
}
