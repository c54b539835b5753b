//! Serving calculator
//!
//! Converts a per-100g nutrient profile into absolute amounts for a serving.

use crate::error::{TrackerError, TrackerResult};
use crate::models::{NutrientTotals, Product, MAX_QUANTITY};

/// Reference amount all product nutrients are normalized to
pub const BASE_UNITS: f64 = 100.0;

/// Nutrients contained in `amount` base-units of `product`.
///
/// `amount` must be finite and positive. Upper bounds are not checked here;
/// use [`validate_quantity`] before persisting.
pub fn calculate(product: &Product, amount: f64) -> TrackerResult<NutrientTotals> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(TrackerError::invalid(format!(
            "amount must be a finite positive number (got {})",
            amount
        )));
    }

    Ok(product.nutrition.scale(amount / BASE_UNITS))
}

/// Check a quantity is within `(0, MAX_QUANTITY]`
pub fn validate_quantity(quantity: f64) -> TrackerResult<()> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(TrackerError::invalid("Quantity must be greater than 0"));
    }
    if quantity > MAX_QUANTITY {
        return Err(TrackerError::invalid(format!(
            "Quantity cannot exceed {}",
            MAX_QUANTITY
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn product(calories: f64, protein: f64, carbs: f64, fat: f64) -> Product {
        Product {
            id: 1,
            name: "Test".to_string(),
            nutrition: NutrientTotals { calories, protein, carbs, fat },
            serving_unit: "g".to_string(),
        }
    }

    #[test]
    fn test_identity_at_base_units() {
        let p = product(389.0, 16.9, 66.3, 6.9);
        let n = calculate(&p, 100.0).unwrap();
        assert!(n.approx_eq(&p.nutrition, EPS));
    }

    #[test]
    fn test_150g_serving() {
        let p = product(200.0, 10.0, 30.0, 5.0);
        let n = calculate(&p, 150.0).unwrap();
        let expected = NutrientTotals { calories: 300.0, protein: 15.0, carbs: 45.0, fat: 7.5 };
        assert!(n.approx_eq(&expected, EPS));
    }

    #[test]
    fn test_linearity() {
        let p = product(123.4, 7.7, 21.0, 3.3);
        for (a1, a2) in [(10.0, 90.0), (33.3, 66.7), (0.5, 9999.0), (250.0, 250.0)] {
            let whole = calculate(&p, a1 + a2).unwrap();
            let parts = calculate(&p, a1).unwrap() + calculate(&p, a2).unwrap();
            assert!(whole.approx_eq(&parts, 1e-6), "{} + {}", a1, a2);
        }
    }

    #[test]
    fn test_missing_fields_stay_zero() {
        let p = product(0.0, 0.0, 12.0, 0.0);
        let n = calculate(&p, 50.0).unwrap();
        assert_eq!(n.calories, 0.0);
        assert!((n.carbs - 6.0).abs() < EPS);
    }

    #[test]
    fn test_rejects_non_positive_amounts() {
        let p = product(100.0, 1.0, 1.0, 1.0);
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = calculate(&p, bad).unwrap_err();
            assert!(err.is_invalid_input());
        }
    }

    #[test]
    fn test_validate_quantity_bounds() {
        assert!(validate_quantity(1.0).is_ok());
        assert!(validate_quantity(MAX_QUANTITY).is_ok());
        assert!(validate_quantity(0.0).is_err());
        assert!(validate_quantity(-1.0).is_err());
        assert!(validate_quantity(MAX_QUANTITY + 0.1).is_err());
        assert!(validate_quantity(f64::NAN).is_err());
    }
}
