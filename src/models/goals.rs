//! Goals model
//!
//! The single daily-goals record. Stored in a one-row table whose id is
//! pinned to 1, so reads return at most one record and writes are a single
//! atomic upsert.

use std::ops::RangeInclusive;

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

pub const DEFAULT_DAILY_CALORIES: i64 = 2500;
pub const DEFAULT_DAILY_PROTEIN: i64 = 150;
pub const DEFAULT_DAILY_CARBS: i64 = 250;
pub const DEFAULT_DAILY_FAT: i64 = 80;

/// Accepted input ranges for each goal
pub const CALORIES_RANGE: RangeInclusive<i64> = 1000..=5000;
pub const PROTEIN_RANGE: RangeInclusive<i64> = 50..=300;
pub const CARBS_RANGE: RangeInclusive<i64> = 50..=500;
pub const FAT_RANGE: RangeInclusive<i64> = 20..=200;

const GOALS_ROW_ID: i64 = 1;

/// Daily calorie (kcal) and macro (grams) targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goals {
    pub daily_calories: i64,
    pub daily_protein: i64,
    pub daily_carbs: i64,
    pub daily_fat: i64,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            daily_calories: DEFAULT_DAILY_CALORIES,
            daily_protein: DEFAULT_DAILY_PROTEIN,
            daily_carbs: DEFAULT_DAILY_CARBS,
            daily_fat: DEFAULT_DAILY_FAT,
        }
    }
}

impl Goals {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            daily_calories: row.get("daily_calories")?,
            daily_protein: row.get("daily_protein")?,
            daily_carbs: row.get("daily_carbs")?,
            daily_fat: row.get("daily_fat")?,
        })
    }

    /// Check every field against its accepted range.
    ///
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let checks = [
            ("daily_calories", self.daily_calories, &CALORIES_RANGE),
            ("daily_protein", self.daily_protein, &PROTEIN_RANGE),
            ("daily_carbs", self.daily_carbs, &CARBS_RANGE),
            ("daily_fat", self.daily_fat, &FAT_RANGE),
        ];

        for (field, value, range) in checks {
            if !range.contains(&value) {
                return Err(format!(
                    "{} must be between {} and {} (got {})",
                    field,
                    range.start(),
                    range.end(),
                    value
                ));
            }
        }

        Ok(())
    }

    /// Read the stored goals, if any
    pub fn read(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM user_goals WHERE id = ?1")?;

        match stmt.query_row([GOALS_ROW_ID], Self::from_row) {
            Ok(goals) => Ok(Some(goals)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Update the stored goals, inserting the row if it does not exist yet
    pub fn write(conn: &Connection, goals: &Goals) -> DbResult<()> {
        conn.execute(
            r#"
            INSERT INTO user_goals (id, daily_calories, daily_protein, daily_carbs, daily_fat)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                daily_calories = excluded.daily_calories,
                daily_protein = excluded.daily_protein,
                daily_carbs = excluded.daily_carbs,
                daily_fat = excluded.daily_fat,
                updated_at = datetime('now')
            "#,
            params![
                GOALS_ROW_ID,
                goals.daily_calories,
                goals.daily_protein,
                goals.daily_carbs,
                goals.daily_fat,
            ],
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_read_empty() {
        let conn = setup();
        assert_eq!(Goals::read(&conn).unwrap(), None);
    }

    #[test]
    fn test_write_is_upsert() {
        let conn = setup();
        let first = Goals {
            daily_calories: 2000,
            daily_protein: 120,
            daily_carbs: 200,
            daily_fat: 60,
        };
        let second = Goals { daily_calories: 3000, ..first };

        Goals::write(&conn, &first).unwrap();
        assert_eq!(Goals::read(&conn).unwrap(), Some(first));

        Goals::write(&conn, &second).unwrap();
        assert_eq!(Goals::read(&conn).unwrap(), Some(second));

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM user_goals", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_defaults() {
        let goals = Goals::default();
        assert_eq!(goals.daily_calories, 2500);
        assert_eq!(goals.daily_protein, 150);
        assert_eq!(goals.daily_carbs, 250);
        assert_eq!(goals.daily_fat, 80);
        assert!(goals.validate().is_ok());
    }

    #[test]
    fn test_validate_ranges() {
        let too_low = Goals { daily_calories: 999, ..Goals::default() };
        let err = too_low.validate().unwrap_err();
        assert!(err.contains("daily_calories"));

        let fat_high = Goals { daily_fat: 201, ..Goals::default() };
        assert!(fat_high.validate().unwrap_err().contains("daily_fat"));

        let edges = Goals {
            daily_calories: 5000,
            daily_protein: 50,
            daily_carbs: 500,
            daily_fat: 20,
        };
        assert!(edges.validate().is_ok());
    }
}
