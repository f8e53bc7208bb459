//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust quote types and PyO3-compatible types (PyDict).

use chrono::{DateTime, Utc};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::quote::{Booking, CancellationQuote, ChangeQuote, NextStep, TourOffer};
use crate::DaysUntilStart;

/// Extract a required field from a Python dict with clear error messages.
fn extract_required<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Missing required field '{}'",
                key
            ))
        })?
        .extract()
}

/// Extract an optional field; a missing key or `None` value both give `None`.
fn extract_optional<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => Ok(Some(value.extract()?)),
        _ => Ok(None),
    }
}

/// Parse an optional RFC 3339 "now" override, defaulting to the wall clock.
pub fn parse_now(now: Option<&str>) -> PyResult<DateTime<Utc>> {
    match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                    "Invalid 'now' timestamp '{}': {}",
                    raw, e
                ))
            }),
        None => Ok(Utc::now()),
    }
}

pub fn parse_booking(py_booking: &Bound<'_, PyDict>) -> PyResult<Booking> {
    Ok(Booking {
        booking_id: extract_required(py_booking, "booking_id")?,
        tour_id: extract_required(py_booking, "tour_id")?,
        start_date: extract_optional(py_booking, "start_date")?,
        num_adults: extract_required(py_booking, "num_adults")?,
        num_children: extract_optional(py_booking, "num_children")?.unwrap_or(0),
        total_price: extract_required(py_booking, "total_price")?,
    })
}

pub fn parse_offer(py_offer: &Bound<'_, PyDict>) -> PyResult<TourOffer> {
    Ok(TourOffer {
        tour_id: extract_required(py_offer, "tour_id")?,
        price_adult: extract_required(py_offer, "price_adult")?,
        price_child: extract_optional(py_offer, "price_child")?.unwrap_or(0.0),
    })
}

fn days_to_py(days: DaysUntilStart) -> Option<i64> {
    days.known()
}

pub fn cancellation_quote_to_py(py: Python, quote: &CancellationQuote) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("booking_id", &quote.booking_id)?;
    dict.set_item("total_price", quote.total_price)?;
    dict.set_item("days_until_start", days_to_py(quote.days_until_start))?;
    dict.set_item("tier", quote.tier.id.to_string())?;
    dict.set_item("tier_title", &quote.tier.title)?;
    dict.set_item("rate", quote.tier.rate)?;
    dict.set_item("penalty_amount", quote.refund.penalty_amount)?;
    dict.set_item("refund_amount", quote.refund.refund_amount)?;
    dict.set_item("note", quote.note.as_deref())?;
    Ok(dict.unbind())
}

pub fn change_quote_to_py(py: Python, quote: &ChangeQuote) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("booking_id", &quote.booking_id)?;
    dict.set_item("from_tour_id", &quote.from_tour_id)?;
    dict.set_item("to_tour_id", &quote.to_tour_id)?;
    dict.set_item("num_adults", quote.num_adults)?;
    dict.set_item("num_children", quote.num_children)?;
    dict.set_item("days_until_start", days_to_py(quote.days_until_start))?;
    dict.set_item("tier", quote.tier.id.to_string())?;
    dict.set_item("new_subtotal", quote.new_subtotal)?;
    dict.set_item("discount", quote.discount)?;
    dict.set_item("price_difference", quote.price_difference.value())?;

    match quote.next_step {
        NextStep::CollectPayment { amount } => {
            dict.set_item("next_step", "collect_payment")?;
            dict.set_item("amount_due", amount)?;
        }
        NextStep::SubmitRequest => {
            dict.set_item("next_step", "submit_request")?;
            dict.set_item("amount_due", 0.0)?;
        }
    }

    Ok(dict.unbind())
}
