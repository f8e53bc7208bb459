//! Promotion discount tests
//!
//! Percentage and fixed promotions, their caps and eligibility rules, and the
//! fallback to no discount when a promotion does not apply.

use chrono::NaiveDate;
use tour_pricing_core::promotion::resolve_discount;
use tour_pricing_core::{compute_price_difference, DiscountKind, Promotion, PromotionError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2026, 10, 18)
}

// ============================================================================
// Discount amounts
// ============================================================================

#[test]
fn test_percentage_discount() {
    let promo = Promotion::new("AUTUMN10", DiscountKind::Percentage(10.0));
    assert_eq!(promo.discount_for(5_000_000.0, today()), Ok(500_000.0));
}

#[test]
fn test_percentage_discount_respects_cap() {
    let promo =
        Promotion::new("AUTUMN10", DiscountKind::Percentage(10.0)).with_max_discount(200_000.0);
    assert_eq!(promo.discount_for(5_000_000.0, today()), Ok(200_000.0));
}

#[test]
fn test_fixed_discount() {
    let promo = Promotion::new("FLAT500K", DiscountKind::FixedAmount(500_000.0));
    assert_eq!(promo.discount_for(5_000_000.0, today()), Ok(500_000.0));
    assert_eq!(promo.discount_for(300_000.0, today()), Ok(300_000.0));
}

#[test]
fn test_zero_subtotal_gives_zero_discount() {
    let promo = Promotion::new("FLAT500K", DiscountKind::FixedAmount(500_000.0));
    assert_eq!(promo.discount_for(0.0, today()), Ok(0.0));
}

// ============================================================================
// Eligibility
// ============================================================================

#[test]
fn test_inactive_promotion() {
    let promo = Promotion::new("OLD", DiscountKind::Percentage(50.0)).deactivated();
    assert_eq!(
        promo.discount_for(1_000.0, today()),
        Err(PromotionError::Inactive("OLD".to_string()))
    );
}

#[test]
fn test_minimum_order_total() {
    let promo = Promotion::new("BIG", DiscountKind::FixedAmount(100.0)).with_min_order_total(1_000.0);
    assert_eq!(
        promo.discount_for(999.0, today()),
        Err(PromotionError::BelowMinimumOrder {
            code: "BIG".to_string(),
            minimum: 1_000.0,
            subtotal: 999.0,
        })
    );
    assert_eq!(promo.discount_for(1_000.0, today()), Ok(100.0));
}

#[test]
fn test_expired_promotion() {
    let promo = Promotion::new("SUMMER", DiscountKind::Percentage(15.0))
        .with_validity(Some(date(2026, 6, 1)), Some(date(2026, 8, 31)));
    let err = promo.discount_for(1_000.0, today()).unwrap_err();
    assert_eq!(err.to_string(), "Promotion SUMMER expired on 2026-08-31");
}

#[test]
fn test_negative_fixed_amount_rejected() {
    let promo = Promotion::new("NEG", DiscountKind::FixedAmount(-10.0));
    assert!(matches!(
        promo.discount_for(1_000.0, today()),
        Err(PromotionError::InvalidDiscount { .. })
    ));
}

// ============================================================================
// Feeding the price difference
// ============================================================================

#[test]
fn test_inapplicable_promotion_counts_as_no_discount() {
    let promo = Promotion::new("LATER", DiscountKind::Percentage(10.0))
        .with_validity(Some(date(2027, 1, 1)), None);
    let discount = resolve_discount(Some(&promo), 5_000_000.0, today());
    assert_eq!(discount, 0.0);

    let diff = compute_price_difference(2_000_000.0, 1_000_000.0, 2, 1, 4_000_000.0, discount);
    assert_eq!(diff.value(), 1_000_000.0);
}

#[test]
fn test_promotion_from_json_feeds_difference() {
    let promo: Promotion = serde_json::from_str(
        r#"{
            "code": "FLAT500K",
            "kind": {"type": "fixed_amount", "value": 500000.0},
            "valid_until": "2026-12-31"
        }"#,
    )
    .unwrap();

    let discount = resolve_discount(Some(&promo), 5_000_000.0, today());
    let diff = compute_price_difference(2_000_000.0, 1_000_000.0, 2, 1, 4_000_000.0, discount);
    assert_eq!(diff.value(), 500_000.0);
    assert!(diff.requires_payment());
}
