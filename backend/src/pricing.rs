//! Price difference for tour changes
//!
//! When a customer swaps a booked tour for another one, the new tour is priced
//! per person for the same party, a promotion discount may be taken off, and
//! the old booking's total is subtracted.
//!
//! A positive difference means the customer pays the gap before the change
//! request is submitted. Zero or negative means no payment is collected.

use serde::{Deserialize, Serialize};

use crate::core::money::clamp_non_negative;

/// Signed cost delta of a tour change
///
/// Positive: additional payment owed. Zero or negative: nothing to collect,
/// the absolute value (if any) is owed back to the customer.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceDifference(pub f64);

impl PriceDifference {
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether the change flow must collect a payment first
    ///
    /// Strictly `> 0`; a zero difference goes straight to submission.
    pub fn requires_payment(self) -> bool {
        self.0 > 0.0
    }

    /// Amount to collect from the customer
    pub fn amount_due(self) -> f64 {
        clamp_non_negative(self.0)
    }

    /// Amount owed back to the customer
    pub fn credit(self) -> f64 {
        clamp_non_negative(-self.0)
    }
}

/// Inputs of a price-difference calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceInputs {
    pub new_price_adult: f64,
    pub new_price_child: f64,
    pub num_adults: u32,
    pub num_children: u32,
    pub old_total_price: f64,
    #[serde(default)]
    pub discount: f64,
}

impl PriceInputs {
    /// New tour price for the party, before any discount
    pub fn new_subtotal(&self) -> f64 {
        new_tour_subtotal(
            self.new_price_adult,
            self.new_price_child,
            self.num_adults,
            self.num_children,
        )
    }

    pub fn difference(&self) -> PriceDifference {
        compute_price_difference(
            self.new_price_adult,
            self.new_price_child,
            self.num_adults,
            self.num_children,
            self.old_total_price,
            self.discount,
        )
    }
}

/// `adult_price * adults + child_price * children`
pub fn new_tour_subtotal(
    price_adult: f64,
    price_child: f64,
    num_adults: u32,
    num_children: u32,
) -> f64 {
    price_adult * f64::from(num_adults) + price_child * f64::from(num_children)
}

/// Compute the difference between the discounted new tour total and the old total
///
/// Pass `0.0` as `discount` when no promotion applies.
///
/// # Example
/// ```
/// use tour_pricing_core::compute_price_difference;
///
/// // 2 adults at 2,000,000 + 1 child at 1,000,000, minus a 500,000 discount
/// let diff = compute_price_difference(2_000_000.0, 1_000_000.0, 2, 1, 4_000_000.0, 500_000.0);
/// assert_eq!(diff.value(), 500_000.0);
/// assert!(diff.requires_payment());
/// ```
pub fn compute_price_difference(
    new_price_adult: f64,
    new_price_child: f64,
    num_adults: u32,
    num_children: u32,
    old_total_price: f64,
    discount: f64,
) -> PriceDifference {
    let raw_new_total = new_tour_subtotal(new_price_adult, new_price_child, num_adults, num_children);
    let adjusted_new_total = clamp_non_negative(raw_new_total - discount);
    PriceDifference(adjusted_new_total - old_total_price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_larger_than_subtotal_clamps_to_zero() {
        let diff = compute_price_difference(100.0, 50.0, 1, 1, 40.0, 1_000.0);
        assert_eq!(diff.value(), -40.0);
        assert_eq!(diff.credit(), 40.0);
        assert_eq!(diff.amount_due(), 0.0);
    }

    #[test]
    fn test_zero_difference_needs_no_payment() {
        let diff = compute_price_difference(1_000.0, 0.0, 2, 0, 2_000.0, 0.0);
        assert_eq!(diff.value(), 0.0);
        assert!(!diff.requires_payment());
        assert_eq!(diff.credit(), 0.0);
    }

    #[test]
    fn test_children_priced_separately() {
        assert_eq!(new_tour_subtotal(300.0, 120.0, 2, 3), 960.0);
        assert_eq!(new_tour_subtotal(300.0, 120.0, 0, 0), 0.0);
    }

    #[test]
    fn test_inputs_discount_defaults_to_zero() {
        let inputs: PriceInputs = serde_json::from_str(
            r#"{"new_price_adult": 10.0, "new_price_child": 5.0,
                "num_adults": 1, "num_children": 2, "old_total_price": 15.0}"#,
        )
        .unwrap();
        assert_eq!(inputs.discount, 0.0);
        assert_eq!(inputs.new_subtotal(), 20.0);
        assert_eq!(inputs.difference().value(), 5.0);
    }

    #[test]
    fn test_price_difference_serializes_as_number() {
        assert_eq!(
            serde_json::to_string(&PriceDifference(-500.0)).unwrap(),
            "-500.0"
        );
    }
}
