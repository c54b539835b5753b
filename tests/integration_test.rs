//! Integration tests for FitStack
//!
//! These tests drive the tracker and tools over a real SQLite file:
//! - Logging and deleting servings
//! - Daily totals against goals
//! - Trend series
//! - Goal upserts and caching

use chrono::NaiveDate;
use fitstack::config::Config;
use fitstack::db::Database;
use fitstack::models::{Goals, Product, ProductCreate};
use fitstack::tools::{dashboard, goals, logs, products};
use fitstack::{Tracker, TrackerError};
use tempfile::TempDir;

/// Helper to create a migrated test database with a tracker on top
fn create_test_tracker() -> (Tracker<Database>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let database = Database::open(&db_path).unwrap();

    let tracker = Tracker::new(database, &Config::with_database_path(db_path));
    (tracker, temp_dir)
}

fn add_product(tracker: &Tracker<Database>, name: &str, macros: [f64; 4]) -> Product {
    let [calories, protein, carbs, fat] = macros;
    tracker
        .store()
        .with_conn(|conn| {
            Product::create(
                conn,
                &ProductCreate {
                    name: name.to_string(),
                    calories: Some(calories),
                    protein: Some(protein),
                    carbs: Some(carbs),
                    fat: Some(fat),
                    serving_unit: "g".to_string(),
                },
            )
        })
        .unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_log_and_report_day() {
    let (tracker, _temp) = create_test_tracker();
    let oats = add_product(&tracker, "Oats", [200.0, 10.0, 30.0, 5.0]);
    let today = date("2025-01-09");

    tracker.add_log(oats.id, 100.0, today, today).unwrap();
    tracker.add_log(oats.id, 50.0, today, today).unwrap();

    let report = dashboard::get_day(&tracker, today);
    assert_eq!(report.entries.len(), 2);
    assert_eq!(report.entries[0].product_name, "Oats");
    assert!((report.entries[1].nutrition.calories - 100.0).abs() < 1e-9);

    assert!((report.totals.calories - 300.0).abs() < 1e-9);
    assert!((report.totals.protein - 15.0).abs() < 1e-9);
    assert!((report.totals.carbs - 45.0).abs() < 1e-9);
    assert!((report.totals.fat - 7.5).abs() < 1e-9);

    assert_eq!(report.goals, Goals::default());
    assert!((report.progress.calories - 12.0).abs() < 1e-9);
}

#[test]
fn test_progress_capped_when_over_goal() {
    let (tracker, _temp) = create_test_tracker();
    let pasta = add_product(&tracker, "Pasta", [250.0, 9.0, 50.0, 1.5]);
    let today = date("2025-01-09");

    let goals = Goals {
        daily_calories: 2000,
        ..Goals::default()
    };
    goals::update_goals(&tracker, goals).unwrap();
    tracker.add_log(pasta.id, 1000.0, today, today).unwrap();

    let report = dashboard::get_day(&tracker, today);
    assert!((report.totals.calories - 2500.0).abs() < 1e-9);
    assert_eq!(report.progress.calories, 100.0);
    assert_eq!(report.progress.carbs, 100.0);
}

#[test]
fn test_delete_log() {
    let (tracker, _temp) = create_test_tracker();
    let oats = add_product(&tracker, "Oats", [200.0, 10.0, 30.0, 5.0]);
    let today = date("2025-01-09");

    let (entry, _) = tracker.add_log(oats.id, 100.0, today, today).unwrap();
    let response = logs::delete_log(&tracker, entry.id).unwrap();
    assert!(response.deleted);

    let report = dashboard::get_day(&tracker, today);
    assert!(report.entries.is_empty());
    assert_eq!(report.totals.calories, 0.0);
}

#[test]
fn test_unknown_product_is_invalid_input() {
    let (tracker, _temp) = create_test_tracker();
    let today = date("2025-01-09");

    let err = tracker.add_log(404, 100.0, today, today).unwrap_err();
    assert!(matches!(err, TrackerError::InvalidInput(_)));
}

#[test]
fn test_trend_has_seven_points_with_gaps() {
    let (tracker, _temp) = create_test_tracker();
    let oats = add_product(&tracker, "Oats", [200.0, 10.0, 30.0, 5.0]);
    let today = date("2025-01-09");

    tracker.add_log(oats.id, 100.0, date("2025-01-01"), today).unwrap();
    tracker.add_log(oats.id, 100.0, date("2025-01-03"), today).unwrap();
    tracker.add_log(oats.id, 50.0, date("2025-01-05"), today).unwrap();
    tracker.add_log(oats.id, 100.0, today, today).unwrap();

    let trend = dashboard::get_trend(&tracker, today);
    assert_eq!(trend.window_days, 7);
    assert_eq!(trend.start_date, date("2025-01-03"));
    assert_eq!(trend.calorie_goal, 2500);
    assert_eq!(trend.days.len(), 7);

    let calories: Vec<f64> = trend.days.iter().map(|d| d.totals.calories).collect();
    assert_eq!(calories, vec![200.0, 0.0, 100.0, 0.0, 0.0, 0.0, 200.0]);
    assert_eq!(trend.days[0].label, "01/03");
}

#[test]
fn test_goals_upsert_and_cache_refresh() {
    let (tracker, _temp) = create_test_tracker();
    assert_eq!(goals::get_goals(&tracker).goals, Goals::default());

    let first = Goals {
        daily_calories: 1800,
        daily_protein: 140,
        daily_carbs: 180,
        daily_fat: 60,
    };
    goals::update_goals(&tracker, first).unwrap();
    assert_eq!(goals::get_goals(&tracker).goals, first);

    let second = Goals {
        daily_calories: 3200,
        ..first
    };
    goals::update_goals(&tracker, second).unwrap();
    let current = goals::get_goals(&tracker);
    assert_eq!(current.goals, second);
    assert_eq!(current.warning, None);

    let rows: i64 = tracker
        .store()
        .with_conn(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM user_goals", [], |row| row.get(0))?)
        })
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn test_product_cache_needs_refresh() {
    let (tracker, _temp) = create_test_tracker();
    add_product(&tracker, "Banana", [89.0, 1.1, 22.8, 0.3]);

    assert_eq!(products::list_products(&tracker, None).total, 1);

    add_product(&tracker, "Apple", [52.0, 0.3, 13.8, 0.2]);
    assert_eq!(products::list_products(&tracker, None).total, 1);

    tracker.refresh_cache();
    let listed = products::list_products(&tracker, None);
    assert_eq!(listed.total, 2);
    assert_eq!(listed.products[0].name, "Apple");

    assert_eq!(products::list_products(&tracker, Some("ban")).total, 1);
}

#[test]
fn test_preview_does_not_write() {
    let (tracker, _temp) = create_test_tracker();
    let oats = add_product(&tracker, "Oats", [200.0, 10.0, 30.0, 5.0]);

    let preview = logs::preview_serving(&tracker, oats.id, 150.0).unwrap();
    assert!((preview.nutrition.calories - 300.0).abs() < 1e-9);
    assert!((preview.nutrition.fat - 7.5).abs() < 1e-9);

    let report = dashboard::get_day(&tracker, fitstack::tracker::today());
    assert!(report.entries.is_empty());
}

#[test]
fn test_add_log_for_product_missing_from_cached_catalog() {
    let (tracker, _temp) = create_test_tracker();
    add_product(&tracker, "Banana", [89.0, 1.1, 22.8, 0.3]);
    assert_eq!(products::list_products(&tracker, None).total, 1);

    let oats = add_product(&tracker, "Oats", [200.0, 10.0, 30.0, 5.0]);
    let response = logs::add_log(&tracker, oats.id, 150.0, fitstack::tracker::today()).unwrap();
    assert_eq!(response.product_name, "Oats");
    assert!((response.nutrition.calories - 300.0).abs() < 1e-9);

    assert_eq!(products::list_products(&tracker, None).total, 2);
}

#[test]
fn test_read_failures_reported_in_responses() {
    let (tracker, _temp) = create_test_tracker();
    let today = date("2025-01-09");
    tracker
        .store()
        .with_conn(|conn| Ok(conn.execute_batch("DROP TABLE daily_logs; DROP TABLE products;")?))
        .unwrap();

    let report = dashboard::get_day(&tracker, today);
    assert!(report.entries.is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("daily logs"));

    let trend = dashboard::get_trend(&tracker, today);
    assert_eq!(trend.days.len(), 7);
    assert_eq!(trend.warnings.len(), 1);

    let listed = products::list_products(&tracker, None);
    assert_eq!(listed.total, 0);
    assert!(listed.warning.is_some());

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["warnings"].is_array());
}
