//! Runtime configuration
//!
//! Read from `FITSTACK_*` environment variables; anything missing or
//! unparseable falls back to its default.

use std::path::PathBuf;
use std::time::Duration;

use crate::nutrition::{DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};

pub const DEFAULT_PRODUCT_CACHE_SECS: u64 = 300;
pub const DEFAULT_GOAL_CACHE_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub product_cache_ttl: Duration,
    pub goal_cache_ttl: Duration,
    pub trend_days: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var("FITSTACK_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_database_path()),
            product_cache_ttl: Duration::from_secs(
                env_number("FITSTACK_PRODUCT_CACHE_SECS").unwrap_or(DEFAULT_PRODUCT_CACHE_SECS),
            ),
            goal_cache_ttl: Duration::from_secs(
                env_number("FITSTACK_GOAL_CACHE_SECS").unwrap_or(DEFAULT_GOAL_CACHE_SECS),
            ),
            trend_days: trend_days_or_default(env_number("FITSTACK_TREND_DAYS")),
        }
    }

    /// Defaults with an explicit database path
    pub fn with_database_path(path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: path.into(),
            product_cache_ttl: Duration::from_secs(DEFAULT_PRODUCT_CACHE_SECS),
            goal_cache_ttl: Duration::from_secs(DEFAULT_GOAL_CACHE_SECS),
            trend_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

fn env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Trend windows outside `1..=MAX_WINDOW_DAYS` fall back to the default
fn trend_days_or_default(days: Option<u32>) -> u32 {
    days.filter(|days| (1..=MAX_WINDOW_DAYS).contains(days))
        .unwrap_or(DEFAULT_WINDOW_DAYS)
}

/// `<project root>/data/fitstack.db`, resolved from the executable location
fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path.push("fitstack.db");
    path
}
