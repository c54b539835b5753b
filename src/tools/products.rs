//! Product Tools
//!
//! Read-only access to the product catalog.

use serde::Serialize;

use crate::models::Product;
use crate::store::NutritionStore;
use crate::tracker::Tracker;

/// Response for list_products
#[derive(Debug, Serialize)]
pub struct ListProductsResponse {
    pub products: Vec<Product>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

pub fn list_products<S: NutritionStore>(
    tracker: &Tracker<S>,
    query: Option<&str>,
) -> ListProductsResponse {
    let catalog = tracker.products();
    let mut products = catalog.value;

    if let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) {
        let needle = query.to_lowercase();
        products.retain(|p| p.name.to_lowercase().contains(&needle));
    }

    ListProductsResponse {
        total: products.len(),
        products,
        warning: catalog.warning,
    }
}
