//! Promotion discounts
//!
//! Resolves the discount amount a promotion grants on a tour subtotal. The
//! amount feeds [`compute_price_difference`](crate::compute_price_difference)
//! during a tour change.
//!
//! A promotion is either a percentage of the subtotal or a fixed amount, and
//! may carry a cap, a minimum order total, and a validity window.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::money::clamp_non_negative;

/// How a promotion reduces the price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DiscountKind {
    /// Percentage of the subtotal, 0 to 100
    Percentage(f64),
    /// Flat amount off the subtotal
    FixedAmount(f64),
}

/// Reasons a promotion cannot be applied
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PromotionError {
    #[error("Promotion {0} is not active")]
    Inactive(String),

    #[error("Promotion {code} is not valid until {valid_from}")]
    NotYetValid { code: String, valid_from: NaiveDate },

    #[error("Promotion {code} expired on {valid_until}")]
    Expired { code: String, valid_until: NaiveDate },

    #[error("Promotion {code} requires an order total of at least {minimum}, got {subtotal}")]
    BelowMinimumOrder {
        code: String,
        minimum: f64,
        subtotal: f64,
    },

    #[error("Promotion {code} has an invalid discount: {reason}")]
    InvalidDiscount { code: String, reason: String },
}

/// A promotion as returned by the promotion lookup
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use tour_pricing_core::promotion::{DiscountKind, Promotion};
///
/// let promo = Promotion::new("SUMMER10", DiscountKind::Percentage(10.0))
///     .with_max_discount(300_000.0);
///
/// let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
/// assert_eq!(promo.discount_for(2_000_000.0, today), Ok(200_000.0));
/// assert_eq!(promo.discount_for(5_000_000.0, today), Ok(300_000.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub code: String,
    pub kind: DiscountKind,
    #[serde(default)]
    pub max_discount: Option<f64>,
    #[serde(default)]
    pub min_order_total: Option<f64>,
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Promotion {
    /// Active promotion with no cap, minimum, or validity window
    pub fn new(code: impl Into<String>, kind: DiscountKind) -> Self {
        Self {
            code: code.into(),
            kind,
            max_discount: None,
            min_order_total: None,
            valid_from: None,
            valid_until: None,
            active: true,
        }
    }

    pub fn with_max_discount(mut self, max_discount: f64) -> Self {
        self.max_discount = Some(max_discount);
        self
    }

    pub fn with_min_order_total(mut self, min_order_total: f64) -> Self {
        self.min_order_total = Some(min_order_total);
        self
    }

    /// Validity window, both ends inclusive
    pub fn with_validity(mut self, from: Option<NaiveDate>, until: Option<NaiveDate>) -> Self {
        self.valid_from = from;
        self.valid_until = until;
        self
    }

    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }

    /// Check that the promotion applies to `subtotal` on `on`
    pub fn check_eligibility(&self, subtotal: f64, on: NaiveDate) -> Result<(), PromotionError> {
        if !self.active {
            return Err(PromotionError::Inactive(self.code.clone()));
        }

        if let Some(valid_from) = self.valid_from {
            if on < valid_from {
                return Err(PromotionError::NotYetValid {
                    code: self.code.clone(),
                    valid_from,
                });
            }
        }

        if let Some(valid_until) = self.valid_until {
            if on > valid_until {
                return Err(PromotionError::Expired {
                    code: self.code.clone(),
                    valid_until,
                });
            }
        }

        if let Some(minimum) = self.min_order_total {
            if subtotal < minimum {
                return Err(PromotionError::BelowMinimumOrder {
                    code: self.code.clone(),
                    minimum,
                    subtotal,
                });
            }
        }

        self.check_discount()
    }

    fn check_discount(&self) -> Result<(), PromotionError> {
        let invalid = |reason: &str| -> Result<(), PromotionError> {
            Err(PromotionError::InvalidDiscount {
                code: self.code.clone(),
                reason: reason.to_string(),
            })
        };

        match self.kind {
            DiscountKind::Percentage(percent) if !(0.0..=100.0).contains(&percent) => {
                invalid("percentage must be between 0 and 100")
            }
            DiscountKind::FixedAmount(amount) if !(amount.is_finite() && amount >= 0.0) => {
                invalid("fixed amount must be non-negative")
            }
            _ => match self.max_discount {
                Some(cap) if cap.is_nan() || cap < 0.0 => invalid("max discount must be non-negative"),
                _ => Ok(()),
            },
        }
    }

    /// Discount granted on `subtotal` on date `on`
    ///
    /// Capped by `max_discount` and by the subtotal itself, never negative.
    pub fn discount_for(&self, subtotal: f64, on: NaiveDate) -> Result<f64, PromotionError> {
        self.check_eligibility(subtotal, on)?;

        let subtotal = clamp_non_negative(subtotal);
        let raw = match self.kind {
            DiscountKind::Percentage(percent) => subtotal * percent / 100.0,
            DiscountKind::FixedAmount(amount) => amount,
        };
        let capped = self.max_discount.map_or(raw, |cap| raw.min(cap));

        Ok(clamp_non_negative(capped.min(subtotal)))
    }

    /// Like [`discount_for`](Self::discount_for), but an inapplicable promotion
    /// counts as no discount
    pub fn discount_or_zero(&self, subtotal: f64, on: NaiveDate) -> f64 {
        self.discount_for(subtotal, on).unwrap_or_else(|err| {
            debug!("promotion not applied: {}", err);
            0.0
        })
    }
}

/// Discount from an optional promotion, zero when absent or inapplicable
pub fn resolve_discount(promotion: Option<&Promotion>, subtotal: f64, on: NaiveDate) -> f64 {
    promotion.map_or(0.0, |promo| promo.discount_or_zero(subtotal, on))
}
