//! Cancellation and tour-change quotes
//!
//! A [`QuoteEngine`] ties the calculators together for the two customer
//! flows:
//!
//! 1. **Cancellation**: start date → days remaining → policy tier → refund
//! 2. **Tour change**: the same policy tier for the booking being changed,
//!    plus the price difference to the new tour after any promotion discount,
//!    and the next step of the flow (collect a payment or submit directly)
//!
//! The engine holds the policy table, a [`Clock`], and the time zone used to
//! read zone-less start dates. Quotes are pure given those three.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use tour_pricing_core::quote::{Booking, NextStep, QuoteEngine, TourOffer};
//! use tour_pricing_core::{FixedClock, PolicyTable, TierId};
//!
//! let now = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
//! let engine = QuoteEngine::new(PolicyTable::standard())
//!     .with_clock(FixedClock::new(now))
//!     .with_time_zone(Utc);
//!
//! let booking = Booking {
//!     booking_id: "BK-1".to_string(),
//!     tour_id: "HALONG-3D".to_string(),
//!     start_date: Some("2026-03-21".to_string()),
//!     num_adults: 2,
//!     num_children: 1,
//!     total_price: 10_000_000.0,
//! };
//!
//! let quote = engine.cancellation_quote(&booking);
//! assert_eq!(quote.tier.id, TierId::Early);
//! assert_eq!(quote.refund.refund_amount, 7_500_000.0);
//!
//! let offer = TourOffer {
//!     tour_id: "SAPA-4D".to_string(),
//!     price_adult: 5_000_000.0,
//!     price_child: 2_000_000.0,
//! };
//! let change = engine.change_quote_with_discount(&booking, &offer, 0.0);
//! assert_eq!(change.next_step, NextStep::CollectPayment { amount: 2_000_000.0 });
//! ```

use chrono::{Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::core::clock::{Clock, SystemClock};
use crate::core::dates::{compute_days_until_start_in, DaysUntilStart};
use crate::policy::{PolicyTable, PolicyTier};
use crate::pricing::{compute_price_difference, new_tour_subtotal, PriceDifference};
use crate::promotion::{resolve_discount, Promotion};
use crate::refund::{compute_refund, RefundComputation};

/// Snapshot of an existing booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: String,
    pub tour_id: String,
    #[serde(default)]
    pub start_date: Option<String>,
    pub num_adults: u32,
    #[serde(default)]
    pub num_children: u32,
    pub total_price: f64,
}

impl Booking {
    pub fn travellers(&self) -> u32 {
        self.num_adults + self.num_children
    }
}

/// Per-person prices of the tour a booking is being moved to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourOffer {
    pub tour_id: String,
    pub price_adult: f64,
    pub price_child: f64,
}

/// What the change flow does after the quote is accepted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum NextStep {
    /// Collect `amount` before submitting the change request
    CollectPayment { amount: f64 },
    /// Submit the change request directly
    SubmitRequest,
}

impl NextStep {
    pub fn for_difference(difference: PriceDifference) -> Self {
        if difference.requires_payment() {
            NextStep::CollectPayment {
                amount: difference.amount_due(),
            }
        } else {
            NextStep::SubmitRequest
        }
    }
}

/// Everything shown to a customer before cancelling a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancellationQuote {
    pub booking_id: String,
    pub total_price: f64,
    pub days_until_start: DaysUntilStart,
    pub tier: PolicyTier,
    pub refund: RefundComputation,
    /// Set when the unknown-date fallback picked the tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Everything shown to a customer before moving a booking to another tour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeQuote {
    pub booking_id: String,
    pub from_tour_id: String,
    pub to_tour_id: String,
    pub num_adults: u32,
    pub num_children: u32,
    pub days_until_start: DaysUntilStart,
    pub tier: PolicyTier,
    pub new_subtotal: f64,
    pub discount: f64,
    pub price_difference: PriceDifference,
    pub next_step: NextStep,
}

impl ChangeQuote {
    /// Party size carried over from the booking
    pub fn travellers(&self) -> u32 {
        self.num_adults + self.num_children
    }
}

/// Builds quotes from a policy table, a clock, and a time zone
#[derive(Debug, Clone)]
pub struct QuoteEngine<C = SystemClock, Tz = Local> {
    table: PolicyTable,
    clock: C,
    tz: Tz,
}

impl QuoteEngine {
    /// Engine on the wall clock and the local time zone
    pub fn new(table: PolicyTable) -> Self {
        Self {
            table,
            clock: SystemClock,
            tz: Local,
        }
    }
}

impl Default for QuoteEngine {
    fn default() -> Self {
        Self::new(PolicyTable::standard())
    }
}

impl<C: Clock, Tz: TimeZone> QuoteEngine<C, Tz> {
    pub fn with_clock<C2: Clock>(self, clock: C2) -> QuoteEngine<C2, Tz> {
        QuoteEngine {
            table: self.table,
            clock,
            tz: self.tz,
        }
    }

    pub fn with_time_zone<Tz2: TimeZone>(self, tz: Tz2) -> QuoteEngine<C, Tz2> {
        QuoteEngine {
            table: self.table,
            clock: self.clock,
            tz,
        }
    }

    pub fn table(&self) -> &PolicyTable {
        &self.table
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Today's calendar date in the engine's time zone
    pub fn today(&self) -> NaiveDate {
        self.clock.now().with_timezone(&self.tz).date_naive()
    }

    pub fn days_until_start(&self, start_date: Option<&str>) -> DaysUntilStart {
        compute_days_until_start_in(start_date, self.clock.now(), &self.tz)
    }

    /// Active tier for a start date
    pub fn policy_for(&self, start_date: Option<&str>) -> &PolicyTier {
        self.table.classify(self.days_until_start(start_date))
    }

    pub fn cancellation_quote(&self, booking: &Booking) -> CancellationQuote {
        let days_until_start = self.days_until_start(booking.start_date.as_deref());
        let tier = self.table.classify(days_until_start);
        let refund = compute_refund(booking.total_price, tier);
        let note = days_until_start
            .is_unknown()
            .then(|| self.table.unknown_date_note());

        CancellationQuote {
            booking_id: booking.booking_id.clone(),
            total_price: booking.total_price,
            days_until_start,
            tier: tier.clone(),
            refund,
            note,
        }
    }

    /// Change quote with the discount of an optional promotion
    ///
    /// A promotion that does not apply counts as no discount.
    pub fn change_quote(
        &self,
        booking: &Booking,
        offer: &TourOffer,
        promotion: Option<&Promotion>,
    ) -> ChangeQuote {
        let subtotal = new_tour_subtotal(
            offer.price_adult,
            offer.price_child,
            booking.num_adults,
            booking.num_children,
        );
        let discount = resolve_discount(promotion, subtotal, self.today());
        self.change_quote_with_discount(booking, offer, discount)
    }

    /// Change quote with an already resolved discount amount
    pub fn change_quote_with_discount(
        &self,
        booking: &Booking,
        offer: &TourOffer,
        discount: f64,
    ) -> ChangeQuote {
        let days_until_start = self.days_until_start(booking.start_date.as_deref());
        let tier = self.table.classify(days_until_start);
        let new_subtotal = new_tour_subtotal(
            offer.price_adult,
            offer.price_child,
            booking.num_adults,
            booking.num_children,
        );
        let price_difference = compute_price_difference(
            offer.price_adult,
            offer.price_child,
            booking.num_adults,
            booking.num_children,
            booking.total_price,
            discount,
        );

        ChangeQuote {
            booking_id: booking.booking_id.clone(),
            from_tour_id: booking.tour_id.clone(),
            to_tour_id: offer.tour_id.clone(),
            num_adults: booking.num_adults,
            num_children: booking.num_children,
            days_until_start,
            tier: tier.clone(),
            new_subtotal,
            discount,
            price_difference,
            next_step: NextStep::for_difference(price_difference),
        }
    }
}
