//! Currency helpers
//!
//! Amounts are plain `f64` in a single currency unit. Every derived currency
//! value goes through [`clamp_non_negative`] so negative or NaN inputs never
//! surface as negative money.

/// `value` if it is positive, otherwise `0.0`
///
/// NaN maps to `0.0`.
///
/// # Example
/// ```
/// use tour_pricing_core::core::money::clamp_non_negative;
///
/// assert_eq!(clamp_non_negative(1_500.0), 1_500.0);
/// assert_eq!(clamp_non_negative(-3.0), 0.0);
/// assert_eq!(clamp_non_negative(f64::NAN), 0.0);
/// ```
pub fn clamp_non_negative(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Round to the nearest whole currency unit for display
///
/// Presentation only. Calculators never call this, so callers round exactly once.
pub fn round_for_display(amount: f64) -> i64 {
    if amount.is_finite() {
        amount.round() as i64
    } else {
        0
    }
}
