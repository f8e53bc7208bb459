//! Refund calculation tests
//!
//! Concrete cancellation scenarios end to end (date string → tier → refund)
//! plus conservation and non-negativity properties.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use tour_pricing_core::core::money::round_for_display;
use tour_pricing_core::{
    compute_days_until_start_in, compute_refund, determine_policy, PolicyTable, TierId,
};

const TOTAL: f64 = 10_000_000.0;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap()
}

/// Helper: full pipeline for a departure `n` days from now
fn refund_for_departure_in(n: i64, total: f64) -> (TierId, f64, f64) {
    let start = (now() + Duration::days(n)).format("%Y-%m-%dT%H:%M:%S").to_string();
    let days = compute_days_until_start_in(Some(&start), now(), &Utc);
    let tier = determine_policy(days);
    let refund = compute_refund(total, tier);
    (tier.id, refund.penalty_amount, refund.refund_amount)
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn test_scenario_twenty_days_out_early() {
    assert_eq!(
        refund_for_departure_in(20, TOTAL),
        (TierId::Early, 2_500_000.0, 7_500_000.0)
    );
}

#[test]
fn test_scenario_ten_days_out_mid() {
    assert_eq!(
        refund_for_departure_in(10, TOTAL),
        (TierId::Mid, 5_000_000.0, 5_000_000.0)
    );
}

#[test]
fn test_scenario_two_days_out_late() {
    assert_eq!(
        refund_for_departure_in(2, TOTAL),
        (TierId::Late, 10_000_000.0, 0.0)
    );
}

#[test]
fn test_scenario_departure_passed_late() {
    assert_eq!(
        refund_for_departure_in(-4, TOTAL),
        (TierId::Late, 10_000_000.0, 0.0)
    );
}

#[test]
fn test_unknown_date_charges_standard_penalty() {
    let days = compute_days_until_start_in(Some("TBD"), now(), &Utc);
    let refund = compute_refund(TOTAL, determine_policy(days));
    assert_eq!(refund.penalty_amount, 2_500_000.0);
    assert_eq!(refund.refund_amount, 7_500_000.0);
}

// ============================================================================
// Malformed totals
// ============================================================================

#[test]
fn test_negative_total_zeroes_both_amounts() {
    for tier in PolicyTable::standard().tiers() {
        let refund = compute_refund(-1_000.0, tier);
        assert_eq!(refund.penalty_amount, 0.0);
        assert_eq!(refund.refund_amount, 0.0);
    }
}

#[test]
fn test_zero_total() {
    let refund = compute_refund(0.0, determine_policy(tour_pricing_core::DaysUntilStart::Known(3)));
    assert_eq!(refund.penalty_amount, 0.0);
    assert_eq!(refund.refund_amount, 0.0);
}

#[test]
fn test_display_rounding_happens_once_outside() {
    let tier = PolicyTable::standard().tier(TierId::Early).cloned().unwrap();
    let refund = compute_refund(1_999_999.0, &tier);
    assert_eq!(refund.penalty_amount, 499_999.75);
    assert_eq!(round_for_display(refund.penalty_amount), 500_000);
    assert_eq!(round_for_display(refund.refund_amount), 1_499_999);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_penalty_plus_refund_is_total(total in 0.0_f64..1e12, tier_index in 0_usize..3) {
        let table = PolicyTable::standard();
        let tier = &table.tiers()[tier_index];
        let refund = compute_refund(total, tier);

        prop_assert!(refund.penalty_amount >= 0.0);
        prop_assert!(refund.refund_amount >= 0.0);
        let sum = refund.penalty_amount + refund.refund_amount;
        prop_assert!((sum - total).abs() <= total * 1e-12 + 1e-9);
    }

    #[test]
    fn prop_negative_total_is_zero(total in -1e12_f64..-1e-9, tier_index in 0_usize..3) {
        let table = PolicyTable::standard();
        let refund = compute_refund(total, &table.tiers()[tier_index]);
        prop_assert_eq!(refund.penalty_amount, 0.0);
        prop_assert_eq!(refund.refund_amount, 0.0);
    }

    #[test]
    fn prop_refund_is_deterministic(total in 0.0_f64..1e9, tier_index in 0_usize..3) {
        let table = PolicyTable::standard();
        let tier = &table.tiers()[tier_index];
        prop_assert_eq!(compute_refund(total, tier), compute_refund(total, tier));
    }
}
