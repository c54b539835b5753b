//! Goal comparison
//!
//! Display percentages are capped at 100; overshoot must be derived from the
//! raw totals.

use serde::Serialize;

use crate::models::{Goals, NutrientTotals};

/// `total` as a percentage of `goal`, clamped to `[0, 100]`.
///
/// A non-positive goal yields 0.
pub fn percent_of(total: f64, goal: f64) -> f64 {
    if goal.is_nan() || goal <= 0.0 {
        return 0.0;
    }
    let pct = total / goal * 100.0;
    if pct.is_nan() {
        return 0.0;
    }
    pct.clamp(0.0, 100.0)
}

/// Capped progress towards each daily goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalProgress {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl GoalProgress {
    pub fn compute(totals: &NutrientTotals, goals: &Goals) -> Self {
        Self {
            calories: percent_of(totals.calories, goals.daily_calories as f64),
            protein: percent_of(totals.protein, goals.daily_protein as f64),
            carbs: percent_of(totals.carbs, goals.daily_carbs as f64),
            fat: percent_of(totals.fat, goals.daily_fat as f64),
        }
    }
}
