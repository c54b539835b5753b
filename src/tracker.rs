//! Tracker service
//!
//! Owns the store and the reference-data caches, and turns stored logs into
//! display-ready numbers. Reads degrade to safe fallbacks (empty collections,
//! default goals) and carry a warning that tools pass on to the client;
//! writes are validated first and their failures are always returned to the
//! caller.

use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Goals, LogEntry, LoggedServing, NutrientTotals, Product};
use crate::nutrition::{
    aggregate, build_series, calculate, validate_quantity, window_start, GoalProgress,
    SeriesPoint, MAX_WINDOW_DAYS,
};
use crate::store::NutritionStore;

const PRODUCTS_KEY: &str = "products";
const GOALS_KEY: &str = "goals";

/// Current local calendar date
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// A read result, possibly a fallback standing in for a failed fetch
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub value: T,
    /// Set when `value` is a fallback
    pub warning: Option<String>,
}

impl<T> Fetched<T> {
    fn or_fallback(result: TrackerResult<T>, fallback: T, note: impl std::fmt::Display) -> Self {
        match result {
            Ok(value) => Self {
                value,
                warning: None,
            },
            Err(e) => {
                let warning = format!("{}; {}", e, note);
                tracing::warn!("{}", warning);
                Self {
                    value: fallback,
                    warning: Some(warning),
                }
            }
        }
    }

    /// Move the warning, if any, into `warnings` and return the value
    pub fn collect_warning(self, warnings: &mut Vec<String>) -> T {
        warnings.extend(self.warning);
        self.value
    }
}

/// Everything needed to render one day
#[derive(Debug, Clone, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub servings: Vec<LoggedServing>,
    pub totals: NutrientTotals,
    pub goals: Goals,
    pub progress: GoalProgress,
    /// Reads that fell back to defaults
    pub warnings: Vec<String>,
}

pub struct Tracker<S> {
    store: S,
    products: TtlCache<&'static str, Vec<Product>>,
    goals: TtlCache<&'static str, Goals>,
    trend_days: u32,
}

impl<S: NutritionStore> Tracker<S> {
    pub fn new(store: S, config: &Config) -> Self {
        Self {
            store,
            products: TtlCache::new(config.product_cache_ttl),
            goals: TtlCache::new(config.goal_cache_ttl),
            trend_days: config.trend_days.min(MAX_WINDOW_DAYS),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn trend_days(&self) -> u32 {
        self.trend_days
    }

    pub fn product_cache_ttl(&self) -> Duration {
        self.products.ttl()
    }

    pub fn goal_cache_ttl(&self) -> Duration {
        self.goals.ttl()
    }

    // --- Reads ---

    /// Product catalog sorted by name; empty if the store is unreachable
    pub fn products(&self) -> Fetched<Vec<Product>> {
        let result = self
            .products
            .get_or_fetch(&PRODUCTS_KEY, || self.store.fetch_products());
        Fetched::or_fallback(result, Vec::new(), "using an empty product list")
    }

    pub fn product(&self, id: i64) -> Option<Product> {
        self.products().value.into_iter().find(|p| p.id == id)
    }

    /// Stored goals, or the defaults when none are stored or the read fails
    pub fn goals(&self) -> Fetched<Goals> {
        let result = self.goals.get_or_fetch(&GOALS_KEY, || {
            self.store.fetch_goals().map(Option::unwrap_or_default)
        });
        Fetched::or_fallback(result, Goals::default(), "using default goals")
    }

    /// Logs for one date; empty if the store is unreachable
    pub fn logs_for_date(&self, date: NaiveDate) -> Fetched<Vec<LoggedServing>> {
        Fetched::or_fallback(
            self.store.fetch_logs_for_date(date),
            Vec::new(),
            format_args!("showing no logs for {}", date),
        )
    }

    pub fn day_summary(&self, date: NaiveDate) -> DaySummary {
        let mut warnings = Vec::new();
        let servings = self.logs_for_date(date).collect_warning(&mut warnings);
        let goals = self.goals().collect_warning(&mut warnings);

        let totals = aggregate(&servings);
        let progress = GoalProgress::compute(&totals, &goals);

        DaySummary {
            date,
            servings,
            totals,
            goals,
            progress,
            warnings,
        }
    }

    /// Daily totals for the trend window ending at `end`, oldest first
    pub fn trend(&self, end: NaiveDate) -> Fetched<Vec<SeriesPoint>> {
        let start = window_start(end, self.trend_days);
        let servings = Fetched::or_fallback(
            self.store.fetch_logs_in_range(start, end),
            Vec::new(),
            format_args!("showing an empty trend for {} to {}", start, end),
        );

        Fetched {
            value: build_series(&servings.value, end, self.trend_days),
            warning: servings.warning,
        }
    }

    /// Estimated nutrients for a serving, without logging it
    pub fn preview(
        &self,
        product_id: i64,
        quantity: f64,
    ) -> TrackerResult<(Product, NutrientTotals)> {
        validate_quantity(quantity)?;

        let product = self.product(product_id).ok_or_else(|| {
            TrackerError::invalid(format!("Product not found with id: {}", product_id))
        })?;
        let nutrition = calculate(&product, quantity)?;

        Ok((product, nutrition))
    }

    // --- Writes ---

    /// Log a serving and return it with its product as stored. `date` may
    /// not be later than `today`.
    pub fn add_log(
        &self,
        product_id: i64,
        quantity: f64,
        date: NaiveDate,
        today: NaiveDate,
    ) -> TrackerResult<(LogEntry, Product)> {
        validate_quantity(quantity)?;
        if date > today {
            return Err(TrackerError::invalid(format!(
                "Cannot log food for a future date: {}",
                date
            )));
        }

        let (entry, product) = report_write(self.store.insert_log(product_id, quantity, date))?;

        // The cached catalog predates this product
        let cached = self.products.get(&PRODUCTS_KEY);
        if cached.is_some_and(|catalog| !catalog.iter().any(|p| p.id == product.id)) {
            self.products.invalidate(&PRODUCTS_KEY);
        }

        tracing::info!(log_id = entry.id, product_id, quantity, %date, "Added food log");
        Ok((entry, product))
    }

    pub fn delete_log(&self, log_id: i64) -> TrackerResult<bool> {
        let deleted = report_write(self.store.delete_log(log_id))?;
        tracing::info!(log_id, deleted, "Deleted food log");
        Ok(deleted)
    }

    /// Validate and store new goals. The goals cache is cleared so the next
    /// read sees them.
    pub fn update_goals(&self, goals: Goals) -> TrackerResult<Goals> {
        goals.validate().map_err(TrackerError::InvalidInput)?;

        report_write(self.store.upsert_goals(&goals))?;
        self.goals.invalidate(&GOALS_KEY);

        tracing::info!(?goals, "Updated goals");
        Ok(goals)
    }

    pub fn refresh_cache(&self) {
        self.products.invalidate_all();
        self.goals.invalidate_all();
        tracing::info!("Cleared product and goal caches");
    }
}

fn report_write<T>(result: TrackerResult<T>) -> TrackerResult<T> {
    match &result {
        Err(e @ TrackerError::InvalidInput(_)) => tracing::warn!("{}", e),
        Err(e) => tracing::error!("{}", e),
        Ok(_) => {}
    }
    result
}
