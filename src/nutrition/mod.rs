//! Nutrition calculation module
//!
//! Pure transforms: serving calculation, daily and trend aggregation, and
//! goal comparison.

pub mod aggregate;
pub mod calculator;
pub mod goals;

pub use aggregate::{
    aggregate, build_series, window_start, SeriesPoint, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS,
};
pub use calculator::{calculate, validate_quantity, BASE_UNITS};
pub use goals::{percent_of, GoalProgress};
