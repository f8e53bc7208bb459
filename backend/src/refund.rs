//! Refund calculation
//!
//! Splits a booking's total price into the penalty kept under the active
//! policy tier and the amount refunded to the customer.

use serde::{Deserialize, Serialize};

use crate::core::money::clamp_non_negative;
use crate::policy::PolicyTier;

/// Penalty and refund for one cancellation
///
/// Both amounts are non-negative. For a non-negative total and a rate in
/// [0, 1], `penalty_amount + refund_amount == total_price` up to float rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefundComputation {
    pub penalty_amount: f64,
    pub refund_amount: f64,
}

impl RefundComputation {
    pub fn is_full_penalty(&self) -> bool {
        self.refund_amount == 0.0
    }
}

/// Compute penalty and refund for `total_price` under `tier`
///
/// No rounding happens here. A negative or NaN total yields zero for both.
///
/// # Example
/// ```
/// use tour_pricing_core::policy::{determine_policy};
/// use tour_pricing_core::{compute_refund, DaysUntilStart};
///
/// let tier = determine_policy(DaysUntilStart::Known(20));
/// let refund = compute_refund(10_000_000.0, tier);
/// assert_eq!(refund.penalty_amount, 2_500_000.0);
/// assert_eq!(refund.refund_amount, 7_500_000.0);
/// ```
pub fn compute_refund(total_price: f64, tier: &PolicyTier) -> RefundComputation {
    let penalty_amount = clamp_non_negative(total_price * tier.rate);
    let refund_amount = clamp_non_negative(total_price - penalty_amount);

    RefundComputation {
        penalty_amount,
        refund_amount,
    }
}
