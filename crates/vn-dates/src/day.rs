//! Day phrases: "hôm nay", "ngày mai", "hôm qua", "ngày kia"/"ngày mốt".
//!
//! A day phrase becomes `ngày DD/MM/YYYY` only when the message holds no
//! idiom and the [`TimeIndicatorGate`] finds a time indicator next to that
//! particular phrase. Only the phrase itself is replaced, so
//! `"ngày mai lúc 10"` becomes `"ngày 02/01/2025 lúc 10"`.

use chrono::{Duration, NaiveDate};
use regex::Regex;

use crate::clock::ReferenceInstant;
use crate::error::Result;
use crate::indicator::TimeIndicatorGate;
use crate::rewrite::{Rewriter, Stage, Substitution};
use crate::rules::{whole_word, PatternRule, DAY_RULES};

#[derive(Debug, Clone)]
struct DayRule {
    rule: PatternRule,
    matcher: Regex,
}

#[derive(Debug, Clone)]
pub struct DayResolver {
    rules: Vec<DayRule>,
    gate: TimeIndicatorGate,
}

impl DayResolver {
    /// Compile one whole-word matcher per day phrase, plus the indicator gate.
    ///
    /// # Errors
    ///
    /// Returns [`VnDatesError::InvalidPattern`](crate::VnDatesError::InvalidPattern)
    /// if a phrase or indicator pattern fails to compile.
    pub fn new() -> Result<Self> {
        let rules = DAY_RULES
            .iter()
            .map(|rule| {
                Ok(DayRule {
                    rule: *rule,
                    matcher: whole_word(rule.phrase)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            rules,
            gate: TimeIndicatorGate::new()?,
        })
    }

    /// Rewrite gated day phrases in `text`.
    ///
    /// When `idiom` is set, the text is returned unchanged: an idiom anywhere
    /// in the message suppresses every day rule, not just nearby ones.
    pub fn resolve(
        &self,
        text: &str,
        reference: &ReferenceInstant,
        idiom: Option<&str>,
    ) -> (String, Vec<Substitution>) {
        if let Some(idiom) = idiom {
            tracing::debug!(idiom, "idiom present, skipping day rules");
            return (text.to_string(), Vec::new());
        }

        let mut rewriter = Rewriter::new(text);
        for DayRule { rule, matcher } in &self.rules {
            for m in matcher.find_iter(text) {
                if rewriter.is_claimed(&m.range()) {
                    continue;
                }
                let Some(evidence) = self.gate.evidence(text, m.range()) else {
                    continue;
                };
                let Some(target) = shift_days(reference.date(), rule.offset) else {
                    tracing::warn!(
                        phrase = m.as_str(),
                        offset = rule.offset,
                        "day offset out of range"
                    );
                    continue;
                };
                let replacement = day_label(target);
                tracing::debug!(
                    phrase = m.as_str(),
                    label = rule.label,
                    ?evidence,
                    %replacement,
                    "resolved day phrase"
                );
                rewriter.claim(Stage::Day, m.range(), replacement);
            }
        }
        rewriter.finish()
    }
}

/// `date` moved by `offset` days, `None` past chrono's supported range.
pub fn shift_days(date: NaiveDate, offset: i32) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(i64::from(offset)))
}

/// `ngày DD/MM/YYYY`
pub fn day_label(date: NaiveDate) -> String {
    format!("ngày {}", date.format("%d/%m/%Y"))
}
