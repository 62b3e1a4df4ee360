//! Reference instants and the clock they fall back to.
//!
//! Every resolver works from an explicit [`ReferenceInstant`]. The system
//! clock is only read through a [`Clock`] supplied by the caller, so a
//! normalization call is a pure function of its inputs under test.
//!
//! # Accepted timestamps
//!
//! - RFC 3339 with an offset or `Z`: `"2025-01-01T10:00:00Z"`, `"2025-01-01T10:00:00+07:00"`
//! - Naive datetimes: `"2025-01-01T10:00:00"`, `"2025-01-01 10:00"`, optional fractional seconds
//! - Bare dates: `"2025-01-01"` (midnight)
//!
//! An offset-carrying timestamp keeps its own wall-clock time unless a
//! timezone is given, in which case the instant is converted into it first.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{Result, VnDatesError};

/// Source of "now" when a message carries no usable timestamp.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Naive layouts tried after RFC 3339, most specific first.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// The wall-clock anchor that relative phrases are resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ReferenceInstant(NaiveDateTime);

impl ReferenceInstant {
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    /// Midnight of `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN))
    }

    /// Parse an ISO 8601 timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`VnDatesError::InvalidDatetime`] when no accepted layout matches.
    pub fn parse(raw: &str, timezone: Option<Tz>) -> Result<Self> {
        let s = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            let wall = match timezone {
                Some(tz) => dt.with_timezone(&tz).naive_local(),
                None => dt.naive_local(),
            };
            return Ok(Self(wall));
        }

        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Self(naive));
            }
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self::from_date)
            .map_err(|e| VnDatesError::InvalidDatetime(format!("'{}': {}", s, e)))
    }

    /// Read `clock` and express the instant as wall-clock time in `timezone`,
    /// or in the host's local timezone when none is configured.
    pub fn from_clock(clock: &dyn Clock, timezone: Option<Tz>) -> Self {
        let now = clock.now();
        let wall = match timezone {
            Some(tz) => now.with_timezone(&tz).naive_local(),
            None => now.with_timezone(&Local).naive_local(),
        };
        Self(wall)
    }

    /// Parse `raw` when present, silently falling back to `clock`.
    pub fn resolve(raw: Option<&str>, timezone: Option<Tz>, clock: &dyn Clock) -> Self {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => Self::parse(s, timezone).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "unparseable reference timestamp, using clock");
                Self::from_clock(clock, timezone)
            }),
            None => {
                tracing::debug!("no reference timestamp, using clock");
                Self::from_clock(clock, timezone)
            }
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// ISO 8601 without offset, fractional seconds only when non-zero.
    pub fn to_iso_string(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
    }
}

impl From<NaiveDateTime> for ReferenceInstant {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::new(datetime)
    }
}

impl From<NaiveDate> for ReferenceInstant {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}
