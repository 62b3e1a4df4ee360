//! Month phrases: "tháng sau", "tháng tới", "tháng trước" → `tháng M/YYYY`.

use chrono::Datelike;
use regex::Regex;

use crate::clock::ReferenceInstant;
use crate::error::Result;
use crate::rewrite::{Rewriter, Stage, Substitution};
use crate::rules::{whole_word, PatternRule, MONTH_RULES};

#[derive(Debug, Clone)]
struct MonthRule {
    rule: PatternRule,
    matcher: Regex,
}

#[derive(Debug, Clone)]
pub struct MonthResolver {
    rules: Vec<MonthRule>,
}

impl MonthResolver {
    /// # Errors
    ///
    /// Returns [`VnDatesError::InvalidPattern`](crate::VnDatesError::InvalidPattern)
    /// if a phrase fails to compile.
    pub fn new() -> Result<Self> {
        let rules = MONTH_RULES
            .iter()
            .map(|rule| {
                Ok(MonthRule {
                    rule: *rule,
                    matcher: whole_word(rule.phrase)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Rewrite every month phrase in `text` against the reference's calendar month.
    pub fn resolve(&self, text: &str, reference: &ReferenceInstant) -> (String, Vec<Substitution>) {
        let date = reference.date();
        let mut rewriter = Rewriter::new(text);
        for MonthRule { rule, matcher } in &self.rules {
            let (year, month) = shift_month(date.year(), date.month(), rule.offset);
            let replacement = month_label(year, month);
            for m in matcher.find_iter(text) {
                tracing::debug!(
                    phrase = m.as_str(),
                    label = rule.label,
                    %replacement,
                    "resolved month phrase"
                );
                rewriter.claim(Stage::Month, m.range(), replacement.clone());
            }
        }
        rewriter.finish()
    }
}

/// Move `(year, month)` by `offset` months, carrying into the year so the
/// month stays in 1..=12.
pub fn shift_month(year: i32, month: u32, offset: i32) -> (i32, u32) {
    let zero_based = month as i32 - 1 + offset;
    (
        year + zero_based.div_euclid(12),
        (zero_based.rem_euclid(12) + 1) as u32,
    )
}

/// `tháng M/YYYY`, month without a leading zero.
pub fn month_label(year: i32, month: u32) -> String {
    format!("tháng {}/{}", month, year)
}
