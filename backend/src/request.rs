//! Cancellation and change request payloads
//!
//! A request is what the booking flow submits once the customer accepts a
//! quote. Each carries a fresh request ID and the quote it was made from, so
//! the back office sees the exact numbers the customer agreed to.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::quote::{CancellationQuote, ChangeQuote, NextStep};

/// Errors that can occur while building a request
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RequestError {
    #[error("Booking ID must not be empty")]
    MissingBookingId,

    #[error("A cancellation reason is required")]
    MissingReason,

    #[error("Booking {0} is already on tour {1}")]
    SameTour(String, String),

    #[error("Booking {0} has no travellers")]
    NoTravellers(String),

    #[error("Payment of {amount} must be confirmed before submitting the change")]
    PaymentNotConfirmed { amount: f64 },
}

/// Request to cancel a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancellationRequest {
    pub request_id: Uuid,
    pub booking_id: String,
    pub reason: String,
    pub quote: CancellationQuote,
}

impl CancellationRequest {
    /// Build a request from an accepted quote
    ///
    /// # Example
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use tour_pricing_core::quote::{Booking, QuoteEngine};
    /// use tour_pricing_core::request::{CancellationRequest, RequestError};
    /// use tour_pricing_core::{FixedClock, PolicyTable};
    ///
    /// let engine = QuoteEngine::new(PolicyTable::standard())
    ///     .with_clock(FixedClock::new(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()))
    ///     .with_time_zone(Utc);
    /// let booking = Booking {
    ///     booking_id: "BK-1".to_string(),
    ///     tour_id: "T-1".to_string(),
    ///     start_date: Some("2026-02-01".to_string()),
    ///     num_adults: 1,
    ///     num_children: 0,
    ///     total_price: 1_000.0,
    /// };
    /// let quote = engine.cancellation_quote(&booking);
    ///
    /// assert_eq!(
    ///     CancellationRequest::new(quote.clone(), "  "),
    ///     Err(RequestError::MissingReason)
    /// );
    /// let request = CancellationRequest::new(quote, "Change of plans").unwrap();
    /// assert_eq!(request.booking_id, "BK-1");
    /// ```
    pub fn new(quote: CancellationQuote, reason: &str) -> Result<Self, RequestError> {
        if quote.booking_id.trim().is_empty() {
            return Err(RequestError::MissingBookingId);
        }

        let reason = reason.trim();
        if reason.is_empty() {
            return Err(RequestError::MissingReason);
        }

        Ok(Self {
            request_id: Uuid::new_v4(),
            booking_id: quote.booking_id.clone(),
            reason: reason.to_string(),
            quote,
        })
    }

    pub fn refund_amount(&self) -> f64 {
        self.quote.refund.refund_amount
    }
}

/// Request to move a booking to another tour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub request_id: Uuid,
    pub booking_id: String,
    pub new_tour_id: String,
    #[serde(default)]
    pub note: Option<String>,
    /// Whether the price difference was collected before submission
    pub payment_collected: bool,
    pub quote: ChangeQuote,
}

/// Builder for [`ChangeRequest`]
#[derive(Debug, Clone)]
pub struct ChangeRequestBuilder {
    quote: ChangeQuote,
    note: Option<String>,
    payment_confirmed: bool,
}

impl ChangeRequest {
    /// Start a request from an accepted quote
    pub fn builder(quote: ChangeQuote) -> ChangeRequestBuilder {
        ChangeRequestBuilder {
            quote,
            note: None,
            payment_confirmed: false,
        }
    }
}

impl ChangeRequestBuilder {
    pub fn note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        let trimmed = note.trim();
        self.note = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Record that the payment step of the flow completed
    pub fn payment_confirmed(mut self) -> Self {
        self.payment_confirmed = true;
        self
    }

    pub fn build(self) -> Result<ChangeRequest, RequestError> {
        let quote = self.quote;

        if quote.booking_id.trim().is_empty() {
            return Err(RequestError::MissingBookingId);
        }
        if quote.from_tour_id == quote.to_tour_id {
            return Err(RequestError::SameTour(quote.booking_id, quote.to_tour_id));
        }
        if quote.travellers() == 0 {
            return Err(RequestError::NoTravellers(quote.booking_id));
        }

        let payment_collected = match quote.next_step {
            NextStep::CollectPayment { amount } if !self.payment_confirmed => {
                return Err(RequestError::PaymentNotConfirmed { amount });
            }
            NextStep::CollectPayment { .. } => true,
            NextStep::SubmitRequest => false,
        };

        Ok(ChangeRequest {
            request_id: Uuid::new_v4(),
            booking_id: quote.booking_id.clone(),
            new_tour_id: quote.to_tour_id.clone(),
            note: self.note,
            payment_collected,
            quote,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dates::DaysUntilStart;
    use crate::policy::{determine_policy, TierId};
    use crate::pricing::PriceDifference;

    fn change_quote(difference: f64) -> ChangeQuote {
        ChangeQuote {
            booking_id: "BK-2".to_string(),
            from_tour_id: "T-OLD".to_string(),
            to_tour_id: "T-NEW".to_string(),
            num_adults: 2,
            num_children: 0,
            days_until_start: DaysUntilStart::Known(30),
            tier: determine_policy(DaysUntilStart::Known(30)).clone(),
            new_subtotal: 1_000.0,
            discount: 0.0,
            price_difference: PriceDifference(difference),
            next_step: NextStep::for_difference(PriceDifference(difference)),
        }
    }

    #[test]
    fn test_payment_required_before_submit() {
        let result = ChangeRequest::builder(change_quote(250.0)).build();
        assert_eq!(
            result,
            Err(RequestError::PaymentNotConfirmed { amount: 250.0 })
        );

        let request = ChangeRequest::builder(change_quote(250.0))
            .payment_confirmed()
            .build()
            .unwrap();
        assert!(request.payment_collected);
        assert_eq!(request.quote.tier.id, TierId::Early);
    }

    #[test]
    fn test_refund_direction_submits_directly() {
        let request = ChangeRequest::builder(change_quote(-250.0))
            .note("  window seat  ")
            .build()
            .unwrap();
        assert!(!request.payment_collected);
        assert_eq!(request.note.as_deref(), Some("window seat"));
        assert_eq!(request.new_tour_id, "T-NEW");
    }

    #[test]
    fn test_same_tour_rejected() {
        let mut quote = change_quote(0.0);
        quote.to_tour_id = "T-OLD".to_string();
        assert_eq!(
            ChangeRequest::builder(quote).build(),
            Err(RequestError::SameTour(
                "BK-2".to_string(),
                "T-OLD".to_string()
            ))
        );
    }

    #[test]
    fn test_no_travellers_rejected() {
        let mut quote = change_quote(0.0);
        quote.num_adults = 0;
        assert_eq!(
            ChangeRequest::builder(quote).build(),
            Err(RequestError::NoTravellers("BK-2".to_string()))
        );
    }

    #[test]
    fn test_children_only_party_accepted() {
        let mut quote = change_quote(0.0);
        quote.num_adults = 0;
        quote.num_children = 1;
        assert!(ChangeRequest::builder(quote).build().is_ok());
    }

    #[test]
    fn test_request_ids_are_unique() {
        let a = ChangeRequest::builder(change_quote(0.0)).build().unwrap();
        let b = ChangeRequest::builder(change_quote(0.0)).build().unwrap();
        assert_ne!(a.request_id, b.request_id);
    }
}
