pub mod achievements;
pub mod completions;
pub mod config;
pub mod stats;
pub mod streak;

use chrono::{DateTime, Utc};
use stash_core::ValidationError;

/// The clock used by commands: `--now` when given, the system clock otherwise.
pub fn resolve_now(now: Option<&str>) -> Result<DateTime<Utc>, ValidationError> {
    match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| ValidationError::InvalidTimestamp(raw.to_string())),
        None => Ok(Utc::now()),
    }
}
