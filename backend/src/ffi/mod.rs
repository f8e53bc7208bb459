//! Python binding
//!
//! Exposes the quote calculators to Python callers as plain functions that
//! accept and return dicts.

pub mod quotes;
pub mod types;
