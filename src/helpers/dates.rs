//! Date helpers

use chrono::{DateTime, Utc};

/// Whole days between `date` and `now`, truncated toward zero.
/// Negative when `date` lies in the future.
pub fn day_difference(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - date).num_days()
}

/// Whole days elapsed since `date`
pub fn days_since(date: DateTime<Utc>) -> i64 {
    day_difference(date, Utc::now())
}
