//! FitStack Macro Tracker Library
//!
//! Nutrition aggregation and goal tracking over a SQLite food log.

pub mod build_info;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod store;
pub mod tools;
pub mod tracker;

pub use error::{TrackerError, TrackerResult};
pub use tracker::Tracker;
