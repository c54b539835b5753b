//! FitStack Status Tool
//!
//! Runtime status and usage instructions for the service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::store::NutritionStore;
use crate::tracker::Tracker;

/// Usage guide for AI assistants
pub const TRACKER_INSTRUCTIONS: &str = r#"
# FitStack Macro Tracker Instructions

## Units

Every product stores calories (kcal), protein, carbs and fat **per 100 g**
(or per 100 ml for liquids, see `serving_unit`). Quantities you log are in
the same base unit: 150 means 150 g.

- Quantity must be greater than 0 and at most 10000.
- Dates use ISO format: YYYY-MM-DD. Omit the date to use today.
- Logs cannot be dated in the future.

## Logging a meal

1. `list_products` (optionally with `query`) to find the product id.
2. `preview_serving` with the product id and quantity to see the estimate.
3. `add_log` with the same values to record it.
4. `get_day` to confirm the day's totals.

To correct a mistake, `delete_log` the entry and add it again. Logs are
never edited in place.

## Reading progress

`get_day` returns the day's entries, totals, goals and `progress`: percent of
each goal reached, **capped at 100**. To see how far over a goal the user is,
compare `totals` with `goals` directly.

`get_trend` returns one point per day for the trend window (7 days by
default), oldest first. Days with nothing logged are present with zeros.

## Goals

`get_goals` returns the current goals (defaults: 2500 kcal, 150 g protein,
250 g carbs, 80 g fat). `update_goals` accepts:

| Goal | Range |
|------|-------|
| daily_calories | 1000 - 5000 |
| daily_protein | 50 - 300 |
| daily_carbs | 50 - 500 |
| daily_fat | 20 - 200 |

## Caching

The product list and goals are cached for a few minutes. If a product was
just added to the catalog and does not show up, call `refresh_cache`.

## Warnings

If the database cannot be read, `get_day`, `get_trend`, `get_goals` and
`list_products` still answer with empty data or default goals, and add a
`warnings` (or `warning`) field. Tell the user the numbers are incomplete
rather than reporting that nothing was logged.
"#;

/// Runtime status of the service
#[derive(Debug, Clone, Serialize)]
pub struct TrackerStatus {
    pub build_number: Option<u64>,
    pub build_timestamp: Option<&'static str>,
    pub version: &'static str,

    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    pub product_cache_ttl_seconds: u64,
    pub goal_cache_ttl_seconds: u64,
    pub trend_days: u32,

    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Response for refresh_cache
#[derive(Debug, Serialize)]
pub struct RefreshCacheResponse {
    pub success: bool,
    pub message: String,
}

pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    pub fn get_status<S: NutritionStore>(&self, tracker: &Tracker<S>) -> TrackerStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        TrackerStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            product_cache_ttl_seconds: tracker.product_cache_ttl().as_secs(),
            goal_cache_ttl_seconds: tracker.goal_cache_ttl().as_secs(),
            trend_days: tracker.trend_days(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

pub fn refresh_cache<S: NutritionStore>(tracker: &Tracker<S>) -> RefreshCacheResponse {
    tracker.refresh_cache();
    RefreshCacheResponse {
        success: true,
        message: "Product and goal caches cleared".to_string(),
    }
}
