//! Time-indicator gating for day phrases.
//!
//! A bare "hôm nay" is usually small talk ("hôm nay trời đẹp"). A day phrase
//! is only treated as a schedule reference when it sits directly next to a
//! time indicator, on either side:
//!
//! - an explicit clock expression (`lúc 10`, `lúc 3pm`, `10:30`, `9h5`,
//!   `10 giờ`), or
//! - a day-part word followed by an action verb (`sáng họp`, `tối bay`).
//!
//! Clock evidence takes priority over day-part evidence.

use std::ops::Range;

use regex::Regex;
use serde::Serialize;

use crate::error::Result;
use crate::rules::{compile, day_part_pattern, CLOCK_PATTERN};

/// Why a day phrase was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Evidence {
    Clock,
    DayPartAction,
}

#[derive(Debug, Clone)]
pub struct TimeIndicatorGate {
    clock_after: Regex,
    clock_before: Regex,
    day_part_after: Regex,
    day_part_before: Regex,
}

impl TimeIndicatorGate {
    /// Compile the clock and day-part matchers for both sides of a phrase.
    ///
    /// # Errors
    ///
    /// Returns [`VnDatesError::InvalidPattern`](crate::VnDatesError::InvalidPattern)
    /// if an indicator pattern fails to compile.
    pub fn new() -> Result<Self> {
        let day_part = day_part_pattern();
        Ok(Self {
            clock_after: compile(&after(CLOCK_PATTERN))?,
            clock_before: compile(&before(CLOCK_PATTERN))?,
            day_part_after: compile(&after(&day_part))?,
            day_part_before: compile(&before(&day_part))?,
        })
    }

    /// Evidence that the phrase at `span` in `text` is a real schedule.
    pub fn evidence(&self, text: &str, span: Range<usize>) -> Option<Evidence> {
        let head = &text[..span.start];
        let tail = &text[span.end..];

        if self.clock_after.is_match(tail) || self.clock_before.is_match(head) {
            Some(Evidence::Clock)
        } else if self.day_part_after.is_match(tail) || self.day_part_before.is_match(head) {
            Some(Evidence::DayPartAction)
        } else {
            None
        }
    }
}

/// Indicator directly after the phrase, separated by whitespace.
fn after(indicator: &str) -> String {
    format!(r"(?i)^\s+(?:{})", indicator)
}

/// Indicator directly before the phrase, separated by whitespace.
fn before(indicator: &str) -> String {
    format!(r"(?i)\b(?:{})\s+$", indicator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> TimeIndicatorGate {
        TimeIndicatorGate::new().unwrap()
    }

    fn evidence_for(text: &str, phrase: &str) -> Option<Evidence> {
        let start = text.find(phrase).unwrap();
        gate().evidence(text, start..start + phrase.len())
    }

    #[test]
    fn test_clock_after_phrase() {
        assert_eq!(evidence_for("ngày mai lúc 10 họp", "ngày mai"), Some(Evidence::Clock));
        assert_eq!(evidence_for("mai 10h họp", "mai"), Some(Evidence::Clock));
        assert_eq!(evidence_for("hôm nay 14:30 gọi", "hôm nay"), Some(Evidence::Clock));
        assert_eq!(evidence_for("ngày kia 9 giờ", "ngày kia"), Some(Evidence::Clock));
        assert_eq!(evidence_for("hôm qua giờ này", "hôm qua"), Some(Evidence::Clock));
    }

    #[test]
    fn test_clock_before_phrase() {
        assert_eq!(evidence_for("họp lúc 10 ngày mai", "ngày mai"), Some(Evidence::Clock));
        assert_eq!(evidence_for("gọi 10h30 hôm nay", "hôm nay"), Some(Evidence::Clock));
        assert_eq!(evidence_for("họp 9:00 ngày kia", "ngày kia"), Some(Evidence::Clock));
    }

    #[test]
    fn test_day_part_action() {
        assert_eq!(
            evidence_for("ngày mai sáng họp", "ngày mai"),
            Some(Evidence::DayPartAction)
        );
        assert_eq!(
            evidence_for("hôm nay trưa ăn với khách", "hôm nay"),
            Some(Evidence::DayPartAction)
        );
        assert_eq!(
            evidence_for("tối bay ngày mai", "ngày mai"),
            Some(Evidence::DayPartAction)
        );
    }

    #[test]
    fn test_clock_outranks_day_part() {
        assert_eq!(
            evidence_for("sáng họp ngày mai 9h", "ngày mai"),
            Some(Evidence::Clock)
        );
    }

    #[test]
    fn test_day_part_without_action_is_not_evidence() {
        assert_eq!(evidence_for("hôm nay sáng trời đẹp", "hôm nay"), None);
        assert_eq!(evidence_for("hôm nay trưa họp", "hôm nay"), Some(Evidence::DayPartAction));
        assert_eq!(evidence_for("hôm nay trưa bay", "hôm nay"), None);
    }

    #[test]
    fn test_bare_day_phrase_has_no_evidence() {
        assert_eq!(evidence_for("hôm nay trời đẹp quá", "hôm nay"), None);
        assert_eq!(evidence_for("ngày mai", "ngày mai"), None);
    }

    #[test]
    fn test_loose_clock_shapes() {
        for (text, phrase) in [
            ("ngày mai lúc 10am họp", "ngày mai"),
            ("mai lúc 9h5 họp", "mai"),
            ("ngày mai 9h5 họp", "ngày mai"),
            ("hôm nay lúc 3pm gọi", "hôm nay"),
            ("ngày mai 10H", "ngày mai"),
            ("hôm nay 7 am chạy bộ", "hôm nay"),
            ("gọi 3pm hôm qua", "hôm qua"),
        ] {
            assert_eq!(evidence_for(text, phrase), Some(Evidence::Clock), "{text}");
        }
    }

    #[test]
    fn test_clock_before_remaining_phrases() {
        assert_eq!(evidence_for("gặp lúc 8 mai", "mai"), Some(Evidence::Clock));
        assert_eq!(evidence_for("họp lúc 10 hôm qua", "hôm qua"), Some(Evidence::Clock));
        assert_eq!(evidence_for("9h ngày mốt", "ngày mốt"), Some(Evidence::Clock));
        assert_eq!(
            evidence_for("tối bay hôm qua", "hôm qua"),
            Some(Evidence::DayPartAction)
        );
    }

    #[test]
    fn test_bare_number_is_not_a_clock() {
        assert_eq!(evidence_for("ngày mai 3 người đi", "ngày mai"), None);
    }

    #[test]
    fn test_indicator_must_be_adjacent() {
        assert_eq!(evidence_for("ngày mai rồi tính, 10h họp", "ngày mai"), None);
    }

    #[test]
    fn test_hour_suffix_must_end_the_word() {
        assert_eq!(evidence_for("ngày mai 10hơn", "ngày mai"), None);
    }
}
