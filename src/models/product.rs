//! Product model
//!
//! A catalog entry with nutrient values per 100 base-units.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use super::NutrientTotals;
use crate::db::{DbError, DbResult};

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Nutrients per 100 base-units
    #[serde(flatten)]
    pub nutrition: NutrientTotals,
    pub serving_unit: String,
}

/// Data for creating a product
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub serving_unit: String,
}

impl Product {
    /// Build from a row of the `products` table.
    ///
    /// NULL nutrient columns read as zero.
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Self::from_prefixed_row(row, "")
    }

    /// Build from a joined row whose product columns carry `prefix`
    pub(crate) fn from_prefixed_row(row: &Row, prefix: &str) -> rusqlite::Result<Self> {
        let col = |name: &str| format!("{}{}", prefix, name);
        let nutrient = |name: &str| -> rusqlite::Result<f64> {
            Ok(row.get::<_, Option<f64>>(col(name).as_str())?.unwrap_or(0.0))
        };

        Ok(Self {
            id: row.get(col("id").as_str())?,
            name: row.get(col("name").as_str())?,
            nutrition: NutrientTotals {
                calories: nutrient("calories")?,
                protein: nutrient("protein")?,
                carbs: nutrient("carbs")?,
                fat: nutrient("fat")?,
            },
            serving_unit: row.get(col("serving_unit").as_str())?,
        })
    }

    /// Insert a new product
    pub fn create(conn: &Connection, data: &ProductCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO products (name, calories, protein, carbs, fat, serving_unit)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                data.name,
                data.calories,
                data.protein,
                data.carbs,
                data.fat,
                data.serving_unit,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a product by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM products WHERE id = ?1")?;

        match stmt.query_row([id], Self::from_row) {
            Ok(product) => Ok(Some(product)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List every product, sorted by name
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM products ORDER BY name ASC, id ASC")?;

        let products = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
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

    fn product(name: &str, calories: Option<f64>) -> ProductCreate {
        ProductCreate {
            name: name.to_string(),
            calories,
            protein: Some(10.0),
            carbs: None,
            fat: Some(5.0),
            serving_unit: "g".to_string(),
        }
    }

    #[test]
    fn test_missing_nutrients_read_as_zero() {
        let conn = setup();
        let p = Product::create(&conn, &product("Rice", None)).unwrap();
        assert_eq!(p.nutrition.calories, 0.0);
        assert_eq!(p.nutrition.carbs, 0.0);
        assert_eq!(p.nutrition.protein, 10.0);
    }

    #[test]
    fn test_list_sorted_by_name() {
        let conn = setup();
        Product::create(&conn, &product("Yogurt", Some(60.0))).unwrap();
        Product::create(&conn, &product("Apple", Some(52.0))).unwrap();
        Product::create(&conn, &product("Mango", Some(60.0))).unwrap();

        let names: Vec<String> = Product::list(&conn)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Apple", "Mango", "Yogurt"]);
    }

    #[test]
    fn test_get_missing_product() {
        let conn = setup();
        assert!(Product::get_by_id(&conn, 99).unwrap().is_none());
    }
}
