//! Food Log Tools
//!
//! Preview, add, and delete logged servings.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::TrackerResult;
use crate::models::NutrientTotals;
use crate::nutrition::calculate;
use crate::store::NutritionStore;
use crate::tracker::{today, Tracker};

/// Response for preview_serving
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: f64,
    pub serving_unit: String,
    pub nutrition: NutrientTotals,
}

/// Response for add_log
#[derive(Debug, Serialize)]
pub struct AddLogResponse {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: f64,
    pub serving_unit: String,
    pub log_date: NaiveDate,
    pub nutrition: NutrientTotals,
}

/// Response for delete_log
#[derive(Debug, Serialize)]
pub struct DeleteLogResponse {
    pub id: i64,
    pub deleted: bool,
}

pub fn preview_serving<S: NutritionStore>(
    tracker: &Tracker<S>,
    product_id: i64,
    quantity: f64,
) -> TrackerResult<PreviewResponse> {
    let (product, nutrition) = tracker.preview(product_id, quantity)?;

    Ok(PreviewResponse {
        product_id: product.id,
        product_name: product.name,
        quantity,
        serving_unit: product.serving_unit,
        nutrition,
    })
}

pub fn add_log<S: NutritionStore>(
    tracker: &Tracker<S>,
    product_id: i64,
    quantity: f64,
    date: NaiveDate,
) -> TrackerResult<AddLogResponse> {
    let (entry, product) = tracker.add_log(product_id, quantity, date, today())?;
    let nutrition = calculate(&product, entry.quantity)?;

    Ok(AddLogResponse {
        id: entry.id,
        product_id: entry.product_id,
        product_name: product.name,
        quantity: entry.quantity,
        serving_unit: product.serving_unit,
        log_date: entry.log_date,
        nutrition,
    })
}

pub fn delete_log<S: NutritionStore>(
    tracker: &Tracker<S>,
    id: i64,
) -> TrackerResult<DeleteLogResponse> {
    let deleted = tracker.delete_log(id)?;
    Ok(DeleteLogResponse { id, deleted })
}
