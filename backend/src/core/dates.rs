//! Start-date resolution
//!
//! Turns the loosely formatted departure date a booking carries into a signed
//! count of days remaining, or [`DaysUntilStart::Unknown`] when no valid date
//! can be read.
//!
//! Accepted forms:
//! - `YYYY-MM-DD` (midnight in the resolver's time zone)
//! - `YYYY-MM-DDTHH:MM[:SS[.fff]]`, optionally followed by `Z` or `±HH:MM`
//! - the same date-times with a space instead of `T`
//! - `DD/MM/YYYY`, optionally followed by a time
//!
//! Date-times without an offset are read in the resolver's time zone.

use chrono::{
    DateTime, Duration, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc,
};
use log::debug;
use serde::{Deserialize, Serialize};

/// Milliseconds in one day
pub const MILLIS_PER_DAY: i64 = 86_400_000;

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

const OFFSET_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// Whole days remaining before a tour departs
///
/// `Unknown` is distinct from `Known(0)`: it means no start date could be
/// read at all. Known values are not clamped and go negative once the
/// departure has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DaysUntilStart {
    Known(i64),
    Unknown,
}

impl DaysUntilStart {
    /// Day count, if known
    pub fn known(self) -> Option<i64> {
        match self {
            DaysUntilStart::Known(days) => Some(days),
            DaysUntilStart::Unknown => None,
        }
    }

    pub fn is_unknown(self) -> bool {
        matches!(self, DaysUntilStart::Unknown)
    }
}

impl From<Option<i64>> for DaysUntilStart {
    fn from(days: Option<i64>) -> Self {
        days.map_or(DaysUntilStart::Unknown, DaysUntilStart::Known)
    }
}

/// Compute days until `start_date` using the machine's local time zone
///
/// # Example
/// ```
/// use chrono::{Duration, Utc};
/// use tour_pricing_core::{compute_days_until_start, DaysUntilStart};
///
/// let now = Utc::now();
/// let start = (now + Duration::days(20)).to_rfc3339();
/// assert_eq!(compute_days_until_start(Some(&start), now), DaysUntilStart::Known(20));
///
/// assert_eq!(compute_days_until_start(None, now), DaysUntilStart::Unknown);
/// assert_eq!(compute_days_until_start(Some("  "), now), DaysUntilStart::Unknown);
/// assert_eq!(compute_days_until_start(Some("soon"), now), DaysUntilStart::Unknown);
/// ```
pub fn compute_days_until_start(start_date: Option<&str>, now: DateTime<Utc>) -> DaysUntilStart {
    compute_days_until_start_in(start_date, now, &Local)
}

/// Compute days until `start_date`, reading zone-less values in `tz`
pub fn compute_days_until_start_in<Tz: TimeZone>(
    start_date: Option<&str>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> DaysUntilStart {
    let Some(raw) = start_date else {
        return DaysUntilStart::Unknown;
    };

    match parse_start_date(raw, tz) {
        Some(start) => DaysUntilStart::Known(days_between(start, now)),
        None => {
            debug!("start date {:?} could not be parsed; treating as unknown", raw);
            DaysUntilStart::Unknown
        }
    }
}

/// `ceil((start - now) / 1 day)` as a signed integer
pub fn days_between(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let diff_ms = (start - now).num_milliseconds();
    let whole_days = diff_ms / MILLIS_PER_DAY;
    // Integer division truncates toward zero, which is already the ceiling
    // for negative differences.
    if diff_ms % MILLIS_PER_DAY > 0 {
        whole_days + 1
    } else {
        whole_days
    }
}

/// Parse a start date into an absolute instant
///
/// Returns `None` for empty or malformed input.
pub fn parse_start_date<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = normalize(trimmed)?;

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::<FixedOffset>::parse_from_str(&normalized, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return localize(naive, tz);
        }
    }

    let date = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d").ok()?;
    localize(date.and_hms_opt(0, 0, 0)?, tz)
}

/// Rewrite `DD/MM/YYYY` to ISO order, a space separator to `T`, and a `Z`
/// suffix to `+00:00`
fn normalize(value: &str) -> Option<String> {
    let (date_part, time_part) = match value.split_once(|c: char| c == ' ' || c == 'T') {
        Some((date, time)) => (date, Some(time.trim())),
        None => (value, None),
    };

    let date = if date_part.contains('/') {
        slash_to_iso(date_part)?
    } else {
        date_part.to_string()
    };

    Some(match time_part {
        Some(time) if !time.is_empty() => format!("{date}T{}", zulu_to_offset(time)),
        _ => date,
    })
}

/// `%:z` does not accept `Z`, and RFC 3339 parsing needs seconds
fn zulu_to_offset(time: &str) -> String {
    match time.strip_suffix('Z').or_else(|| time.strip_suffix('z')) {
        Some(rest) => format!("{rest}+00:00"),
        None => time.to_string(),
    }
}

fn slash_to_iso(value: &str) -> Option<String> {
    let mut parts = value.split('/');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let numeric = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !(numeric(day) && numeric(month) && numeric(year)) {
        return None;
    }
    Some(format!("{year}-{month:0>2}-{day:0>2}"))
}

/// Resolve a wall-clock time in `tz`, stepping over DST gaps
fn localize<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    let resolved = match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            after_gap(naive).and_then(|shifted| tz.from_local_datetime(&shifted).earliest())
        }
    };
    resolved.map(|dt| dt.with_timezone(&Utc))
}

/// Wall-clock time one hour later, `None` past the representable range
fn after_gap(naive: NaiveDateTime) -> Option<NaiveDateTime> {
    naive.checked_add_signed(Duration::hours(1))
}
