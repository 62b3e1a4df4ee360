//! Week phrases: "tuần sau", "tuần tới", "tuần trước".
//!
//! A week phrase is replaced by the full calendar week it points at,
//! `tuần DD/MM-DD/MM/YYYY`. Week phrases are specific enough on their own,
//! so neither the idiom check nor the time-indicator gate applies.

use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::Regex;
use serde::Serialize;

use crate::clock::ReferenceInstant;
use crate::error::{Result, VnDatesError};
use crate::rewrite::{Rewriter, Stage, Substitution};
use crate::rules::{whole_word, PatternRule, WEEK_RULES};

// ── Configurable week start ─────────────────────────────────────────────────

/// Which day begins a week for week-range computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStartDay {
    /// ISO 8601 and Vietnamese convention (Thứ Hai).
    #[default]
    Monday,
    /// US/Canada convention.
    Sunday,
}

impl FromStr for WeekStartDay {
    type Err = VnDatesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Ok(Self::Monday),
            "sunday" | "sun" => Ok(Self::Sunday),
            other => Err(VnDatesError::InvalidConfig(format!(
                "unknown week start: '{other}'"
            ))),
        }
    }
}

/// How many days `weekday` is from the week-start day.
fn days_from_week_start(weekday: Weekday, week_start: WeekStartDay) -> i64 {
    match week_start {
        WeekStartDay::Monday => weekday.num_days_from_monday() as i64,
        WeekStartDay::Sunday => weekday.num_days_from_sunday() as i64,
    }
}

// ── Resolver ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct WeekRule {
    rule: PatternRule,
    matcher: Regex,
}

#[derive(Debug, Clone)]
pub struct WeekResolver {
    rules: Vec<WeekRule>,
    week_start: WeekStartDay,
}

impl WeekResolver {
    /// Compile the week phrases; ranges start on `week_start`.
    ///
    /// # Errors
    ///
    /// Returns [`VnDatesError::InvalidPattern`](crate::VnDatesError::InvalidPattern)
    /// if a phrase fails to compile.
    pub fn new(week_start: WeekStartDay) -> Result<Self> {
        let rules = WEEK_RULES
            .iter()
            .map(|rule| {
                Ok(WeekRule {
                    rule: *rule,
                    matcher: whole_word(rule.phrase)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules, week_start })
    }

    /// Rewrite every week phrase in `text`. Week phrases need no time indicator.
    pub fn resolve(&self, text: &str, reference: &ReferenceInstant) -> (String, Vec<Substitution>) {
        let mut rewriter = Rewriter::new(text);
        for WeekRule { rule, matcher } in &self.rules {
            let Some((start, end)) = week_range(reference.date(), rule.offset, self.week_start)
            else {
                tracing::warn!(
                    label = rule.label,
                    offset = rule.offset,
                    "week offset out of range"
                );
                continue;
            };
            let replacement = week_label(start, end);
            for m in matcher.find_iter(text) {
                tracing::debug!(
                    phrase = m.as_str(),
                    label = rule.label,
                    %replacement,
                    "resolved week phrase"
                );
                rewriter.claim(Stage::Week, m.range(), replacement.clone());
            }
        }
        rewriter.finish()
    }
}

/// First and last day of the week `offset` weeks away from the week holding `date`.
///
/// Returns `None` when the range falls outside chrono's supported dates.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use vn_dates::week::week_range;
/// use vn_dates::WeekStartDay;
///
/// // Wednesday 8 Jan 2025, next week
/// let wed = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
/// let (start, end) = week_range(wed, 1, WeekStartDay::Monday).unwrap();
/// assert_eq!(start, NaiveDate::from_ymd_opt(2025, 1, 13).unwrap());
/// assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 19).unwrap());
/// ```
pub fn week_range(
    date: NaiveDate,
    offset: i32,
    week_start: WeekStartDay,
) -> Option<(NaiveDate, NaiveDate)> {
    let this_start =
        date.checked_sub_signed(Duration::days(days_from_week_start(date.weekday(), week_start)))?;
    let start = this_start.checked_add_signed(Duration::weeks(i64::from(offset)))?;
    let end = start.checked_add_signed(Duration::days(6))?;
    Some((start, end))
}

/// `tuần DD/MM-DD/MM/YYYY`
pub fn week_label(start: NaiveDate, end: NaiveDate) -> String {
    format!("tuần {}-{}", start.format("%d/%m"), end.format("%d/%m/%Y"))
}
