//! Dashboard Tools
//!
//! Daily intake against goals, and the rolling trend.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Goals, NutrientTotals};
use crate::nutrition::{calculate, window_start, GoalProgress, SeriesPoint};
use crate::store::NutritionStore;
use crate::tracker::Tracker;

/// A logged serving with its computed nutrition
#[derive(Debug, Serialize)]
pub struct LogLine {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: f64,
    pub serving_unit: String,
    pub nutrition: NutrientTotals,
}

/// Response for get_day
#[derive(Debug, Serialize)]
pub struct DayReport {
    pub date: NaiveDate,
    pub entries: Vec<LogLine>,
    pub totals: NutrientTotals,
    pub goals: Goals,
    /// Percent of each goal reached, capped at 100
    pub progress: GoalProgress,
    /// Reads that failed and were replaced by defaults
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Response for get_trend
#[derive(Debug, Serialize)]
pub struct TrendReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub window_days: u32,
    pub calorie_goal: i64,
    pub days: Vec<SeriesPoint>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

pub fn get_day<S: NutritionStore>(tracker: &Tracker<S>, date: NaiveDate) -> DayReport {
    let summary = tracker.day_summary(date);

    let mut entries = Vec::with_capacity(summary.servings.len());
    for serving in &summary.servings {
        let Some(product) = serving.product.as_ref() else {
            continue;
        };
        let Ok(nutrition) = calculate(product, serving.entry.quantity) else {
            continue;
        };
        entries.push(LogLine {
            id: serving.entry.id,
            product_id: product.id,
            product_name: product.name.clone(),
            quantity: serving.entry.quantity,
            serving_unit: product.serving_unit.clone(),
            nutrition,
        });
    }

    DayReport {
        date: summary.date,
        entries,
        totals: summary.totals,
        goals: summary.goals,
        progress: summary.progress,
        warnings: summary.warnings,
    }
}

pub fn get_trend<S: NutritionStore>(tracker: &Tracker<S>, end_date: NaiveDate) -> TrendReport {
    let mut warnings = Vec::new();
    let days = tracker.trend(end_date).collect_warning(&mut warnings);
    let goals = tracker.goals().collect_warning(&mut warnings);

    TrendReport {
        start_date: window_start(end_date, tracker.trend_days()),
        end_date,
        window_days: tracker.trend_days(),
        calorie_goal: goals.daily_calories,
        days,
        warnings,
    }
}
