//! Shared nutrient structure
//!
//! Used for per-100g product profiles as well as derived totals.

use serde::{Deserialize, Serialize};

/// Calories (kcal) and macros (grams)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl NutrientTotals {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale every field by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            protein: self.protein * multiplier,
            carbs: self.carbs * multiplier,
            fat: self.fat * multiplier,
        }
    }

    /// True when every field is within `epsilon` of `other`
    pub fn approx_eq(&self, other: &NutrientTotals, epsilon: f64) -> bool {
        (self.calories - other.calories).abs() < epsilon
            && (self.protein - other.protein).abs() < epsilon
            && (self.carbs - other.carbs).abs() < epsilon
            && (self.fat - other.fat).abs() < epsilon
    }
}

impl std::ops::Add for NutrientTotals {
    type Output = NutrientTotals;

    fn add(self, other: NutrientTotals) -> NutrientTotals {
        NutrientTotals {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
        }
    }
}

impl std::ops::AddAssign for NutrientTotals {
    fn add_assign(&mut self, other: NutrientTotals) {
        *self = *self + other;
    }
}
