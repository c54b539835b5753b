//! Log Entry model
//!
//! One logged serving of a product on a calendar date.

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use super::Product;
use crate::db::{DbError, DbResult};

/// Largest quantity (in base-units) a single log may carry
pub const MAX_QUANTITY: f64 = 10_000.0;

/// A persisted log row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub product_id: i64,
    pub quantity: f64,
    pub log_date: NaiveDate,
    pub created_at: String,
}

/// A log joined with its product; `product` is None for a dangling reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedServing {
    pub entry: LogEntry,
    pub product: Option<Product>,
}

/// Joined select used by every LoggedServing query
const JOINED_SELECT: &str = r#"
    SELECT
        l.id, l.product_id, l.quantity, l.log_date, l.created_at,
        p.id AS p_id, p.name AS p_name, p.calories AS p_calories,
        p.protein AS p_protein, p.carbs AS p_carbs, p.fat AS p_fat,
        p.serving_unit AS p_serving_unit
    FROM daily_logs l
    LEFT JOIN products p ON p.id = l.product_id
"#;

impl LogEntry {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            product_id: row.get("product_id")?,
            quantity: row.get("quantity")?,
            log_date: row.get("log_date")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Insert a new log
    pub fn create(
        conn: &Connection,
        product_id: i64,
        quantity: f64,
        log_date: NaiveDate,
    ) -> DbResult<Self> {
        conn.execute(
            "INSERT INTO daily_logs (product_id, quantity, log_date) VALUES (?1, ?2, ?3)",
            params![product_id, quantity, log_date],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a log by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM daily_logs WHERE id = ?1")?;

        match stmt.query_row([id], Self::from_row) {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a log, returning whether a row was removed
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM daily_logs WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

impl LoggedServing {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let entry = LogEntry::from_row(row)?;
        let product = match row.get::<_, Option<i64>>("p_id")? {
            Some(_) => Some(Product::from_prefixed_row(row, "p_")?),
            None => None,
        };
        Ok(Self { entry, product })
    }

    /// All logs for one date, in insertion order
    pub fn list_for_date(conn: &Connection, date: NaiveDate) -> DbResult<Vec<Self>> {
        let sql = format!("{} WHERE l.log_date = ?1 ORDER BY l.id", JOINED_SELECT);
        let mut stmt = conn.prepare(&sql)?;

        let servings = stmt
            .query_map([date], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(servings)
    }

    /// All logs with `start <= log_date <= end`
    pub fn list_in_range(
        conn: &Connection,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<Self>> {
        let sql = format!(
            "{} WHERE l.log_date >= ?1 AND l.log_date <= ?2 ORDER BY l.log_date, l.id",
            JOINED_SELECT
        );
        let mut stmt = conn.prepare(&sql)?;

        let servings = stmt
            .query_map(params![start, end], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(servings)
    }
}
