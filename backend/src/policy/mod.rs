//! Cancellation / Change Policy Module
//!
//! A policy table is an ordered list of tiers. Each tier covers a range of
//! days-until-departure and carries the penalty rate charged when a booking
//! is cancelled or changed inside that range.
//!
//! # Standard Schedule
//!
//! | Tier  | Days before departure | Penalty |
//! |-------|-----------------------|---------|
//! | EARLY | more than 15          | 25%     |
//! | MID   | 8 to 15               | 50%     |
//! | LATE  | 7 or fewer (or past)  | 100%    |
//!
//! An unknown departure date falls back to EARLY: the missing date never
//! blocks a quote, the customer is charged the standard 25% penalty.
//!
//! # Custom Tables
//!
//! Tables are plain data and can be loaded from JSON. Every table is validated
//! on construction (see [`validation`]), so a [`PolicyTable`] in hand always
//! classifies every day count into exactly one tier.
//!
//! ```rust
//! use tour_pricing_core::policy::{determine_policy, TierId};
//! use tour_pricing_core::DaysUntilStart;
//!
//! assert_eq!(determine_policy(DaysUntilStart::Known(16)).id, TierId::Early);
//! assert_eq!(determine_policy(DaysUntilStart::Known(15)).id, TierId::Mid);
//! assert_eq!(determine_policy(DaysUntilStart::Known(8)).id, TierId::Mid);
//! assert_eq!(determine_policy(DaysUntilStart::Known(7)).id, TierId::Late);
//! assert_eq!(determine_policy(DaysUntilStart::Unknown).id, TierId::Early);
//! ```

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::dates::DaysUntilStart;

pub mod validation;

pub use validation::{validate_table, PolicyValidationError};

/// Identifier of a policy tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TierId {
    Early,
    Mid,
    Late,
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TierId::Early => "EARLY",
            TierId::Mid => "MID",
            TierId::Late => "LATE",
        };
        f.write_str(label)
    }
}

/// Inclusive range of days-until-departure
///
/// `None` leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    #[serde(default)]
    pub min: Option<i64>,
    #[serde(default)]
    pub max: Option<i64>,
}

impl DayRange {
    pub const fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }

    /// `min..`
    pub const fn at_least(min: i64) -> Self {
        Self::new(Some(min), None)
    }

    /// `..=max`
    pub const fn at_most(max: i64) -> Self {
        Self::new(None, Some(max))
    }

    /// `min..=max`
    pub const fn between(min: i64, max: i64) -> Self {
        Self::new(Some(min), Some(max))
    }

    pub fn contains(&self, days: i64) -> bool {
        self.min.map_or(true, |min| days >= min) && self.max.map_or(true, |max| days <= max)
    }
}

/// One bracket of the refund schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyTier {
    pub id: TierId,
    pub title: String,
    pub time_range_label: String,
    /// Penalty as a fraction of the total price, in [0, 1]
    pub rate: f64,
    pub description: String,
    pub days: DayRange,
}

impl PolicyTier {
    /// Penalty rate as a whole percentage (0.25 → 25)
    pub fn rate_percent(&self) -> f64 {
        self.rate * 100.0
    }
}

/// Errors raised while loading a policy table
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Failed to read policy table: {0}")]
    LoadError(#[from] std::io::Error),

    #[error("Failed to parse policy table JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Policy table validation failed: {0:?}")]
    ValidationError(Vec<PolicyValidationError>),
}

/// Serialized shape of a policy table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyTableDef {
    pub tiers: Vec<PolicyTier>,
    /// Tier applied when the departure date is unknown
    pub unknown_tier: TierId,
}

/// Validated, ordered policy table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolicyTableDef", into = "PolicyTableDef")]
pub struct PolicyTable {
    tiers: Vec<PolicyTier>,
    unknown_tier: TierId,
    unknown_index: usize,
}

impl PolicyTable {
    /// Build a table, rejecting it if any validation check fails
    pub fn new(tiers: Vec<PolicyTier>, unknown_tier: TierId) -> Result<Self, PolicyError> {
        Self::try_from(PolicyTableDef {
            tiers,
            unknown_tier,
        })
    }

    /// The built-in EARLY / MID / LATE schedule
    pub fn standard() -> Self {
        standard_table().clone()
    }

    /// Load a table from a JSON string
    ///
    /// # Example
    /// ```
    /// use tour_pricing_core::policy::PolicyTable;
    ///
    /// let json = serde_json::to_string(&PolicyTable::standard()).unwrap();
    /// let table = PolicyTable::from_json(&json).unwrap();
    /// assert_eq!(table, PolicyTable::standard());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let def: PolicyTableDef = serde_json::from_str(json)?;
        Self::try_from(def)
    }

    /// Load a table from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PolicyError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn tiers(&self) -> &[PolicyTier] {
        &self.tiers
    }

    pub fn tier(&self, id: TierId) -> Option<&PolicyTier> {
        self.tiers.iter().find(|tier| tier.id == id)
    }

    /// Tier applied when the departure date is unknown
    pub fn unknown_date_tier(&self) -> &PolicyTier {
        &self.tiers[self.unknown_index]
    }

    /// Text shown when the unknown-date fallback is in effect
    pub fn unknown_date_note(&self) -> String {
        format!(
            "Departure date unknown: applying the standard {}% penalty",
            self.unknown_date_tier().rate_percent()
        )
    }

    /// Select the single tier active for `days`
    ///
    /// Tiers are checked in table order and the first match wins.
    pub fn classify(&self, days: DaysUntilStart) -> &PolicyTier {
        match days {
            DaysUntilStart::Unknown => {
                debug!(
                    "departure date unknown, falling back to {}",
                    self.unknown_tier
                );
                self.unknown_date_tier()
            }
            DaysUntilStart::Known(days) => self
                .tiers
                .iter()
                .find(|tier| tier.days.contains(days))
                // Validation guarantees full coverage; the strictest tier
                // backs that up.
                .unwrap_or_else(|| self.strictest_tier()),
        }
    }

    fn strictest_tier(&self) -> &PolicyTier {
        self.tiers
            .iter()
            .max_by(|a, b| a.rate.total_cmp(&b.rate))
            .unwrap_or(&self.tiers[self.unknown_index])
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<PolicyTableDef> for PolicyTable {
    type Error = PolicyError;

    fn try_from(def: PolicyTableDef) -> Result<Self, Self::Error> {
        validate_table(&def).map_err(PolicyError::ValidationError)?;

        let unknown_index = def
            .tiers
            .iter()
            .position(|tier| tier.id == def.unknown_tier)
            .ok_or_else(|| {
                PolicyError::ValidationError(vec![PolicyValidationError::UnknownTierMissing(
                    def.unknown_tier,
                )])
            })?;

        Ok(Self {
            tiers: def.tiers,
            unknown_tier: def.unknown_tier,
            unknown_index,
        })
    }
}

impl From<PolicyTable> for PolicyTableDef {
    fn from(table: PolicyTable) -> Self {
        Self {
            tiers: table.tiers,
            unknown_tier: table.unknown_tier,
        }
    }
}

fn standard_tiers() -> Vec<PolicyTier> {
    vec![
        PolicyTier {
            id: TierId::Early,
            title: "Early cancellation".to_string(),
            time_range_label: "More than 15 days before departure".to_string(),
            rate: 0.25,
            description: "25% of the total price is charged; the remaining 75% is refunded."
                .to_string(),
            days: DayRange::at_least(16),
        },
        PolicyTier {
            id: TierId::Mid,
            title: "Standard cancellation".to_string(),
            time_range_label: "8 to 15 days before departure".to_string(),
            rate: 0.50,
            description: "50% of the total price is charged; the remaining 50% is refunded."
                .to_string(),
            days: DayRange::between(8, 15),
        },
        PolicyTier {
            id: TierId::Late,
            title: "Late cancellation".to_string(),
            time_range_label: "7 days or less before departure".to_string(),
            rate: 1.00,
            description: "The full price is charged; no refund is issued.".to_string(),
            days: DayRange::at_most(7),
        },
    ]
}

fn standard_table() -> &'static PolicyTable {
    static STANDARD: OnceLock<PolicyTable> = OnceLock::new();
    STANDARD.get_or_init(|| {
        let tiers = standard_tiers();
        PolicyTable {
            unknown_index: 0,
            unknown_tier: TierId::Early,
            tiers,
        }
    })
}

/// Classify `days` against the standard schedule
pub fn determine_policy(days: DaysUntilStart) -> &'static PolicyTier {
    standard_table().classify(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_is_valid() {
        let def = PolicyTableDef::from(PolicyTable::standard());
        assert_eq!(validate_table(&def), Ok(()));
    }

    #[test]
    fn test_standard_unknown_tier_is_early() {
        let table = PolicyTable::standard();
        assert_eq!(table.unknown_date_tier().id, TierId::Early);
        assert_eq!(table.unknown_date_tier().rate, 0.25);
        assert_eq!(
            table.unknown_date_note(),
            "Departure date unknown: applying the standard 25% penalty"
        );
    }

    #[test]
    fn test_day_range_contains() {
        assert!(DayRange::at_least(16).contains(16));
        assert!(!DayRange::at_least(16).contains(15));
        assert!(DayRange::between(8, 15).contains(8));
        assert!(DayRange::between(8, 15).contains(15));
        assert!(!DayRange::between(8, 15).contains(7));
        assert!(DayRange::at_most(7).contains(i64::MIN));
    }

    #[test]
    fn test_tier_id_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&TierId::Mid).unwrap(), "\"MID\"");
        assert_eq!(TierId::Late.to_string(), "LATE");
    }

    #[test]
    fn test_tier_lookup_by_id() {
        let table = PolicyTable::standard();
        assert_eq!(table.tier(TierId::Mid).map(|t| t.rate), Some(0.5));
    }
}
