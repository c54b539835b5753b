//! FitStack Tools module
//!
//! Tool implementations behind the MCP server. Each function takes the
//! tracker, does the work, and returns a serializable response.

pub mod dashboard;
pub mod goals;
pub mod logs;
pub mod products;
pub mod status;

use chrono::NaiveDate;

use crate::error::{TrackerError, TrackerResult};
use crate::tracker::today;

/// Parse an optional `YYYY-MM-DD` date, defaulting to today
pub fn parse_date_or_today(date: Option<&str>) -> TrackerResult<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            TrackerError::invalid(format!("Invalid date '{}', expected YYYY-MM-DD", s))
        }),
        None => Ok(today()),
    }
}
