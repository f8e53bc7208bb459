// Policy Table Validation
//
// Checks run before a table is accepted:
// - At least one tier
// - Tier ID uniqueness
// - Rates finite and within [0, 1]
// - Ranges not inverted
// - Full coverage of the day axis with no gaps or overlaps
// - Unknown-date tier present

use crate::policy::{DayRange, PolicyTableDef, PolicyTier, TierId};
use std::collections::HashSet;
use thiserror::Error;

/// Validation errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PolicyValidationError {
    #[error("Policy table has no tiers")]
    EmptyTable,

    #[error("Duplicate tier ID: {0}")]
    DuplicateTierId(TierId),

    #[error("Tier {tier} has rate {rate}, expected a value in [0, 1]")]
    InvalidRate { tier: TierId, rate: f64 },

    #[error("Tier {tier} has min {min} greater than max {max}")]
    InvertedRange { tier: TierId, min: i64, max: i64 },

    #[error("Lowest tier {0} must be open below")]
    BoundedBelow(TierId),

    #[error("Highest tier {0} must be open above")]
    BoundedAbove(TierId),

    #[error("Days {from}..={to} are not covered between {lower} and {upper}")]
    Gap {
        lower: TierId,
        upper: TierId,
        from: i64,
        to: i64,
    },

    #[error("Tiers {0} and {1} overlap")]
    Overlap(TierId, TierId),

    #[error("Unknown-date tier {0} is not in the table")]
    UnknownTierMissing(TierId),
}

/// Validation result
pub type ValidationResult = Result<(), Vec<PolicyValidationError>>;

/// Validate a policy table definition
///
/// Runs every check and returns all errors found.
///
/// # Example
///
/// ```rust
/// use tour_pricing_core::policy::{validate_table, PolicyTableDef, PolicyValidationError, TierId};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let json = r#"{
///   "unknown_tier": "EARLY",
///   "tiers": [
///     {"id": "EARLY", "title": "Early", "time_range_label": "> 15 days",
///      "rate": 0.25, "description": "", "days": {"min": 16}},
///     {"id": "LATE", "title": "Late", "time_range_label": "<= 7 days",
///      "rate": 1.0, "description": "", "days": {"max": 7}}
///   ]
/// }"#;
/// let def: PolicyTableDef = serde_json::from_str(json)?;
///
/// let errors = validate_table(&def).unwrap_err();
/// assert_eq!(
///     errors,
///     vec![PolicyValidationError::Gap {
///         lower: TierId::Late,
///         upper: TierId::Early,
///         from: 8,
///         to: 15,
///     }]
/// );
/// # Ok(())
/// # }
/// ```
pub fn validate_table(def: &PolicyTableDef) -> ValidationResult {
    if def.tiers.is_empty() {
        return Err(vec![PolicyValidationError::EmptyTable]);
    }

    let mut errors = Vec::new();

    if let Err(e) = validate_unique_ids(&def.tiers) {
        errors.extend(e);
    }

    if let Err(e) = validate_rates(&def.tiers) {
        errors.extend(e);
    }

    // Coverage checks assume well-formed ranges
    match validate_ranges(&def.tiers) {
        Ok(()) => {
            if let Err(e) = validate_coverage(&def.tiers) {
                errors.extend(e);
            }
        }
        Err(e) => errors.extend(e),
    }

    if !def.tiers.iter().any(|tier| tier.id == def.unknown_tier) {
        errors.push(PolicyValidationError::UnknownTierMissing(def.unknown_tier));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_unique_ids(tiers: &[PolicyTier]) -> ValidationResult {
    let mut seen = HashSet::new();
    let errors: Vec<_> = tiers
        .iter()
        .filter(|tier| !seen.insert(tier.id))
        .map(|tier| PolicyValidationError::DuplicateTierId(tier.id))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_rates(tiers: &[PolicyTier]) -> ValidationResult {
    let errors: Vec<_> = tiers
        .iter()
        .filter(|tier| !(tier.rate.is_finite() && (0.0..=1.0).contains(&tier.rate)))
        .map(|tier| PolicyValidationError::InvalidRate {
            tier: tier.id,
            rate: tier.rate,
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_ranges(tiers: &[PolicyTier]) -> ValidationResult {
    let errors: Vec<_> = tiers
        .iter()
        .filter_map(|tier| match tier.days {
            DayRange {
                min: Some(min),
                max: Some(max),
            } if min > max => Some(PolicyValidationError::InvertedRange {
                tier: tier.id,
                min,
                max,
            }),
            _ => None,
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Walk tiers from the lowest day count upward and check each boundary
fn validate_coverage(tiers: &[PolicyTier]) -> ValidationResult {
    let mut sorted: Vec<&PolicyTier> = tiers.iter().collect();
    sorted.sort_by_key(|tier| tier.days.min.unwrap_or(i64::MIN));

    let mut errors = Vec::new();

    let (Some(lowest), Some(highest)) = (sorted.first(), sorted.last()) else {
        return Err(vec![PolicyValidationError::EmptyTable]);
    };
    if lowest.days.min.is_some() {
        errors.push(PolicyValidationError::BoundedBelow(lowest.id));
    }
    if highest.days.max.is_some() {
        errors.push(PolicyValidationError::BoundedAbove(highest.id));
    }

    for pair in sorted.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        let (Some(lower_max), Some(upper_min)) = (lower.days.max, upper.days.min) else {
            errors.push(PolicyValidationError::Overlap(lower.id, upper.id));
            continue;
        };

        if upper_min <= lower_max {
            errors.push(PolicyValidationError::Overlap(lower.id, upper.id));
        } else if upper_min > lower_max.saturating_add(1) {
            errors.push(PolicyValidationError::Gap {
                lower: lower.id,
                upper: upper.id,
                from: lower_max + 1,
                to: upper_min - 1,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
