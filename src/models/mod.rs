//! Data models
//!
//! Rust structs representing database entities.

mod goals;
mod log_entry;
mod nutrition;
mod product;

pub use goals::{
    Goals, CALORIES_RANGE, CARBS_RANGE, DEFAULT_DAILY_CALORIES, DEFAULT_DAILY_CARBS,
    DEFAULT_DAILY_FAT, DEFAULT_DAILY_PROTEIN, FAT_RANGE, PROTEIN_RANGE,
};
pub use log_entry::{LogEntry, LoggedServing, MAX_QUANTITY};
pub use nutrition::NutrientTotals;
pub use product::{Product, ProductCreate};
