//! PyO3 functions for quotes
//!
//! # Example (from Python)
//!
//! ```python
//! from tour_pricing_core import cancellation_quote, price_difference
//!
//! booking = {
//!     "booking_id": "BK-1",
//!     "tour_id": "HALONG-3D",
//!     "start_date": "2026-03-21",
//!     "num_adults": 2,
//!     "total_price": 10_000_000,
//! }
//! quote = cancellation_quote(booking, now="2026-03-01T00:00:00Z")
//! print(quote["tier"], quote["refund_amount"])
//!
//! diff = price_difference(2_000_000, 1_000_000, 2, 1, 4_000_000, discount=500_000)
//! assert diff["requires_payment"]
//! ```

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{cancellation_quote_to_py, change_quote_to_py, parse_booking, parse_now, parse_offer};
use crate::core::clock::FixedClock;
use crate::core::dates::compute_days_until_start;
use crate::pricing::compute_price_difference;
use crate::quote::QuoteEngine;
use crate::PolicyTable;

fn engine_at(now: Option<&str>) -> PyResult<QuoteEngine<FixedClock>> {
    let now = parse_now(now)?;
    Ok(QuoteEngine::new(PolicyTable::standard()).with_clock(FixedClock::new(now)))
}

/// Days until `start_date`, or `None` when the date is unknown
#[pyfunction]
#[pyo3(signature = (start_date, now = None))]
pub fn days_until_start(start_date: Option<&str>, now: Option<&str>) -> PyResult<Option<i64>> {
    let now = parse_now(now)?;
    Ok(compute_days_until_start(start_date, now).known())
}

/// Cancellation quote for a booking dict
#[pyfunction]
#[pyo3(signature = (booking, now = None))]
pub fn cancellation_quote(
    py: Python,
    booking: &Bound<'_, PyDict>,
    now: Option<&str>,
) -> PyResult<Py<PyDict>> {
    let booking = parse_booking(booking)?;
    let quote = engine_at(now)?.cancellation_quote(&booking);
    cancellation_quote_to_py(py, &quote)
}

/// Tour-change quote for a booking dict and an offer dict
#[pyfunction]
#[pyo3(signature = (booking, offer, discount = 0.0, now = None))]
pub fn change_quote(
    py: Python,
    booking: &Bound<'_, PyDict>,
    offer: &Bound<'_, PyDict>,
    discount: f64,
    now: Option<&str>,
) -> PyResult<Py<PyDict>> {
    let booking = parse_booking(booking)?;
    let offer = parse_offer(offer)?;
    let quote = engine_at(now)?.change_quote_with_discount(&booking, &offer, discount);
    change_quote_to_py(py, &quote)
}

/// Signed price difference of a tour change
#[pyfunction]
#[pyo3(signature = (new_price_adult, new_price_child, num_adults, num_children, old_total_price, discount = 0.0))]
pub fn price_difference(
    py: Python,
    new_price_adult: f64,
    new_price_child: f64,
    num_adults: u32,
    num_children: u32,
    old_total_price: f64,
    discount: f64,
) -> PyResult<Py<PyDict>> {
    let difference = compute_price_difference(
        new_price_adult,
        new_price_child,
        num_adults,
        num_children,
        old_total_price,
        discount,
    );

    let dict = PyDict::new_bound(py);
    dict.set_item("difference", difference.value())?;
    dict.set_item("requires_payment", difference.requires_payment())?;
    dict.set_item("amount_due", difference.amount_due())?;
    dict.set_item("credit", difference.credit())?;
    Ok(dict.unbind())
}
