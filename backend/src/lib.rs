//! Tour Pricing Core - Cancellation & Change Policy Engine
//!
//! Deterministic pricing rules behind a tour booking's cancellation and
//! tour-change flows.
//!
//! # Architecture
//!
//! - **core**: Clock, start-date resolution, currency clamping
//! - **policy**: Policy tiers, the standard schedule, table validation
//! - **refund**: Penalty / refund split for a cancellation
//! - **pricing**: Price difference for a tour change
//! - **promotion**: Promotion discount resolution
//! - **quote**: End-to-end cancellation and change quotes
//! - **request**: Request payloads submitted after a quote is accepted
//!
//! # Critical Invariants
//!
//! 1. Calculators never fail: unknown dates fall back to a tier, bad prices clamp to 0
//! 2. Derived currency amounts are never negative (the price difference is signed by design)
//! 3. "Now" is always injected, never read inside a calculator

// Module declarations
pub mod core;
pub mod policy;
pub mod pricing;
pub mod promotion;
pub mod quote;
pub mod refund;
pub mod request;

// Re-exports for convenience
pub use crate::core::clock::{Clock, FixedClock, SystemClock};
pub use crate::core::dates::{compute_days_until_start, compute_days_until_start_in, DaysUntilStart};
pub use policy::{determine_policy, PolicyError, PolicyTable, PolicyTier, TierId};
pub use pricing::{compute_price_difference, PriceDifference, PriceInputs};
pub use promotion::{DiscountKind, Promotion, PromotionError};
pub use quote::{Booking, CancellationQuote, ChangeQuote, NextStep, QuoteEngine, TourOffer};
pub use refund::{compute_refund, RefundComputation};
pub use request::{CancellationRequest, ChangeRequest, RequestError};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn tour_pricing_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::quotes::days_until_start, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::quotes::cancellation_quote, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::quotes::change_quote, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::quotes::price_difference, m)?)?;
    Ok(())
}
