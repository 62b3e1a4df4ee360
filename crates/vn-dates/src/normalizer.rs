//! The normalization pipeline.
//!
//! Stages run once per call, always in this order, each reading the previous
//! stage's output:
//!
//! 1. idiom check
//! 2. day phrases (skipped when an idiom was found, gated per phrase)
//! 3. week phrases
//! 4. month phrases
//!
//! Every replacement format (`ngày 02/01/2025`, `tuần 13/01-19/01/2025`,
//! `tháng 1/2026`) is outside every rule's input, so normalizing twice gives
//! the same text as normalizing once.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use vn_dates::{Normalizer, ReferenceInstant};
//!
//! let normalizer = Normalizer::new().unwrap();
//! let reference = ReferenceInstant::from_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
//! let out = normalizer.normalize("ngày mai lúc 10 họp với anh Tuấn", &reference);
//! assert_eq!(out, "ngày 02/01/2025 lúc 10 họp với anh Tuấn");
//! ```

use chrono_tz::Tz;
use serde::Serialize;

use crate::clock::{Clock, ReferenceInstant};
use crate::day::DayResolver;
use crate::error::{Result, VnDatesError};
use crate::idiom::IdiomGuard;
use crate::month::MonthResolver;
use crate::rewrite::Substitution;
use crate::week::{WeekResolver, WeekStartDay};

/// Options for [`Normalizer::with_options`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    /// Timezone that timestamps and clock readings are converted into before
    /// resolving. `None` keeps a timestamp's own wall clock and reads the
    /// clock in the host's local timezone.
    pub timezone: Option<Tz>,
    /// Which day starts the week for week ranges.
    pub week_start: WeekStartDay,
}

impl NormalizeOptions {
    /// Set the timezone from an IANA name such as `"Asia/Ho_Chi_Minh"`.
    ///
    /// # Errors
    ///
    /// Returns [`VnDatesError::InvalidTimezone`] for an unknown name.
    pub fn with_timezone_name(mut self, name: &str) -> Result<Self> {
        let tz = name
            .parse::<Tz>()
            .map_err(|_| VnDatesError::InvalidTimezone(format!("'{}'", name)))?;
        self.timezone = Some(tz);
        Ok(self)
    }

    /// Set which day starts the week.
    pub fn with_week_start(mut self, week_start: WeekStartDay) -> Self {
        self.week_start = week_start;
        self
    }
}

/// Result of [`Normalizer::normalize_with_report`].
#[derive(Debug, Clone, Serialize)]
pub struct Normalized {
    /// The rewritten text.
    pub text: String,
    /// The anchor every phrase was resolved against.
    pub reference: ReferenceInstant,
    /// The idiom that suppressed day rules, if any.
    pub idiom: Option<&'static str>,
    /// Replacements in stage order. Offsets refer to each stage's own input.
    pub substitutions: Vec<Substitution>,
}

/// Compiled rule set. Build once at startup and share freely; it is
/// `Send + Sync` and holds no mutable state.
#[derive(Debug, Clone)]
pub struct Normalizer {
    options: NormalizeOptions,
    idioms: IdiomGuard,
    days: DayResolver,
    weeks: WeekResolver,
    months: MonthResolver,
}

impl Normalizer {
    /// Compile the built-in rules with default options.
    ///
    /// # Errors
    ///
    /// Returns [`VnDatesError::InvalidPattern`] if a rule fails to compile.
    pub fn new() -> Result<Self> {
        Self::with_options(NormalizeOptions::default())
    }

    /// Compile the built-in rules with `options`.
    ///
    /// # Errors
    ///
    /// Returns [`VnDatesError::InvalidPattern`] if a rule fails to compile.
    pub fn with_options(options: NormalizeOptions) -> Result<Self> {
        Ok(Self {
            options,
            idioms: IdiomGuard::new()?,
            days: DayResolver::new()?,
            weeks: WeekResolver::new(options.week_start)?,
            months: MonthResolver::new()?,
        })
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Rewrite relative Vietnamese dates in `text` against `reference`.
    pub fn normalize(&self, text: &str, reference: &ReferenceInstant) -> String {
        self.normalize_with_report(text, reference).text
    }

    /// Like [`normalize`](Self::normalize), also returning what was replaced.
    pub fn normalize_with_report(&self, text: &str, reference: &ReferenceInstant) -> Normalized {
        let idiom = self.idioms.detect(text);

        let (text, mut substitutions) = self.days.resolve(text, reference, idiom);
        let (text, weeks) = self.weeks.resolve(&text, reference);
        substitutions.extend(weeks);
        let (text, months) = self.months.resolve(&text, reference);
        substitutions.extend(months);

        Normalized {
            text,
            reference: *reference,
            idiom,
            substitutions,
        }
    }

    /// Normalize against an ISO 8601 `sent_at` timestamp, falling back to
    /// `clock` when it is absent or unparseable.
    pub fn normalize_at(&self, text: &str, sent_at: Option<&str>, clock: &dyn Clock) -> String {
        self.normalize(text, &self.reference(sent_at, clock))
    }

    /// The anchor a call with `sent_at` would use.
    pub fn reference(&self, sent_at: Option<&str>, clock: &dyn Clock) -> ReferenceInstant {
        ReferenceInstant::resolve(sent_at, self.options.timezone, clock)
    }
}
