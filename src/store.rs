//! Persistence boundary
//!
//! The tracker only talks to storage through [`NutritionStore`]. The SQLite
//! [`Database`] is the production implementation.

use chrono::NaiveDate;

use crate::db::Database;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Goals, LogEntry, LoggedServing, Product};

pub trait NutritionStore {
    /// Every product, sorted by name
    fn fetch_products(&self) -> TrackerResult<Vec<Product>>;

    /// The stored goals, or None when no record exists
    fn fetch_goals(&self) -> TrackerResult<Option<Goals>>;

    fn fetch_logs_for_date(&self, date: NaiveDate) -> TrackerResult<Vec<LoggedServing>>;

    /// Logs with `start <= log_date <= end`
    fn fetch_logs_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> TrackerResult<Vec<LoggedServing>>;

    /// Store a serving of an existing product and return it with that
    /// product. An unknown product id is invalid input.
    fn insert_log(
        &self,
        product_id: i64,
        quantity: f64,
        date: NaiveDate,
    ) -> TrackerResult<(LogEntry, Product)>;

    /// Returns whether a log was removed
    fn delete_log(&self, log_id: i64) -> TrackerResult<bool>;

    /// Update the goals record, creating it if absent
    fn upsert_goals(&self, goals: &Goals) -> TrackerResult<()>;
}

impl NutritionStore for Database {
    fn fetch_products(&self) -> TrackerResult<Vec<Product>> {
        self.with_conn(Product::list).map_err(TrackerError::fetch("products"))
    }

    fn fetch_goals(&self) -> TrackerResult<Option<Goals>> {
        self.with_conn(Goals::read).map_err(TrackerError::fetch("goals"))
    }

    fn fetch_logs_for_date(&self, date: NaiveDate) -> TrackerResult<Vec<LoggedServing>> {
        self.with_conn(|conn| LoggedServing::list_for_date(conn, date))
            .map_err(TrackerError::fetch("daily logs"))
    }

    fn fetch_logs_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> TrackerResult<Vec<LoggedServing>> {
        self.with_conn(|conn| LoggedServing::list_in_range(conn, start, end))
            .map_err(TrackerError::fetch("log history"))
    }

    fn insert_log(
        &self,
        product_id: i64,
        quantity: f64,
        date: NaiveDate,
    ) -> TrackerResult<(LogEntry, Product)> {
        let conn = self.get_conn().map_err(TrackerError::write("add food log"))?;

        let product = Product::get_by_id(&conn, product_id)
            .map_err(TrackerError::write("add food log"))?
            .ok_or_else(|| {
                TrackerError::invalid(format!("Product not found with id: {}", product_id))
            })?;

        let entry = LogEntry::create(&conn, product_id, quantity, date)
            .map_err(TrackerError::write("add food log"))?;
        Ok((entry, product))
    }

    fn delete_log(&self, log_id: i64) -> TrackerResult<bool> {
        self.with_conn(|conn| LogEntry::delete(conn, log_id))
            .map_err(TrackerError::write("delete food log"))
    }

    fn upsert_goals(&self, goals: &Goals) -> TrackerResult<()> {
        self.with_conn(|conn| Goals::write(conn, goals))
            .map_err(TrackerError::write("update goals"))
    }
}
