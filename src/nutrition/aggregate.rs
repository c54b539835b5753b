//! Daily totals and rolling trend series

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::calculator::calculate;
use crate::models::{LoggedServing, NutrientTotals};

/// Default number of days in a trend series
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Longest trend window the tracker will build
pub const MAX_WINDOW_DAYS: u32 = 366;

/// One day in a trend series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    /// Chart label, "MM/DD"
    pub label: String,
    pub totals: NutrientTotals,
}

/// Sum the nutrients of every serving.
///
/// Servings without a product are skipped, as are servings whose stored
/// quantity the calculator rejects.
pub fn aggregate<'a, I>(servings: I) -> NutrientTotals
where
    I: IntoIterator<Item = &'a LoggedServing>,
{
    let mut totals = NutrientTotals::zero();

    for serving in servings {
        let Some(product) = serving.product.as_ref() else {
            continue;
        };

        match calculate(product, serving.entry.quantity) {
            Ok(nutrition) => totals += nutrition,
            Err(e) => tracing::warn!(
                log_id = serving.entry.id,
                "Skipping log in totals: {}",
                e
            ),
        }
    }

    totals
}

/// First date of a `window_days` window ending at `today`
pub fn window_start(today: NaiveDate, window_days: u32) -> NaiveDate {
    let back = u64::from(window_days.saturating_sub(1));
    today.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN)
}

/// Per-day totals for the `window_days` days ending at `today`, oldest first.
///
/// Days without servings are present with zero totals, so the series has
/// exactly `window_days` points unless the window would begin before
/// `NaiveDate::MIN`. It never runs past `today`.
pub fn build_series(
    servings: &[LoggedServing],
    today: NaiveDate,
    window_days: u32,
) -> Vec<SeriesPoint> {
    let start = window_start(today, window_days);

    start
        .iter_days()
        .take_while(|date| *date <= today)
        .take(window_days as usize)
        .map(|date| {
            let totals = aggregate(servings.iter().filter(|s| s.entry.log_date == date));
            SeriesPoint {
                date,
                label: date.format("%m/%d").to_string(),
                totals,
            }
        })
        .collect()
}
