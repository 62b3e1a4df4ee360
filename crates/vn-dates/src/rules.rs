//! Static rule tables.
//!
//! Rules are plain data: a phrase, an offset, and a canonical label. The
//! resolvers compile them once into matchers and own the behaviour. Table
//! order is significant: when two phrases overlap (`ngày mai` contains
//! `mai`), the earlier rule claims the text.

use regex::Regex;

use crate::error::{Result, VnDatesError};

/// One relative phrase and how far it points from the reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternRule {
    /// Literal phrase; words match across any run of whitespace.
    pub phrase: &'static str,
    /// Days, weeks or months depending on the table.
    pub offset: i32,
    /// Canonical English label, used in logs and reports.
    pub label: &'static str,
}

const fn rule(phrase: &'static str, offset: i32, label: &'static str) -> PatternRule {
    PatternRule {
        phrase,
        offset,
        label,
    }
}

/// Day phrases, offsets in days.
pub const DAY_RULES: &[PatternRule] = &[
    rule("ngày mai", 1, "tomorrow"),
    rule("mai", 1, "tomorrow"),
    rule("hôm nay", 0, "today"),
    rule("hôm qua", -1, "yesterday"),
    rule("ngày kia", 2, "day after tomorrow"),
    rule("ngày mốt", 2, "day after tomorrow"),
];

/// Week phrases, offsets in weeks.
pub const WEEK_RULES: &[PatternRule] = &[
    rule("tuần sau", 1, "next week"),
    rule("tuần tới", 1, "next week"),
    rule("tuần trước", -1, "last week"),
];

/// Month phrases, offsets in months.
pub const MONTH_RULES: &[PatternRule] = &[
    rule("tháng sau", 1, "next month"),
    rule("tháng tới", 1, "next month"),
    rule("tháng trước", -1, "last month"),
];

/// Colloquial "some unspecified time" expressions. Any of them anywhere in a
/// message disables the day rules for that message.
pub const IDIOMS: &[&str] = &[
    "mai mốt",
    "mai này",
    "mai kia",
    "bữa nào",
    "hôm nào",
    "lúc nào",
    "khi nào",
];

/// Explicit clock expressions: `lúc` followed by any digit (`lúc 10`,
/// `lúc 3pm`, `lúc 9h5`), `10:30`, `10h`, `9h5`, `10am`, `10 giờ`, or a bare
/// `giờ`. Each arm carries its own trailing boundary, so `10hơn` is not a
/// clock.
pub const CLOCK_PATTERN: &str = concat!(
    r"lúc\s*\d[\w:]*",
    r"|\d{1,2}:\d{2}(?:\s*[ap]m)?\b",
    r"|\d{1,2}h\d{0,2}(?:\s*[ap]m)?\b",
    r"|\d{1,2}\s*[ap]m\b",
    r"|\d{1,2}\s*giờ(?:\s*\d{1,2})?\b",
    r"|giờ\b",
);

/// Day-part words and the action verbs that must directly follow them.
pub const DAY_PART_ACTIONS: &[(&str, &[&str])] = &[
    ("sáng", &["họp", "bay", "gặp", "đi"]),
    ("chiều", &["họp", "bay", "gặp", "đi"]),
    ("tối", &["họp", "bay", "gặp", "đi"]),
    ("trưa", &["họp", "ăn", "gặp"]),
];

/// Regex source for a literal phrase: words escaped, joined by `\s+`.
pub(crate) fn phrase_pattern(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

/// Case-insensitive, whole-word matcher for a single phrase.
pub(crate) fn whole_word(phrase: &str) -> Result<Regex> {
    compile(&format!(r"(?i)\b{}\b", phrase_pattern(phrase)))
}

/// Regex source for the day-part + action alternation.
pub(crate) fn day_part_pattern() -> String {
    DAY_PART_ACTIONS
        .iter()
        .map(|(part, verbs)| {
            let verbs: Vec<String> = verbs.iter().map(|v| regex::escape(v)).collect();
            format!(r"{}\s*(?:{})\b", regex::escape(part), verbs.join("|"))
        })
        .collect::<Vec<_>>()
        .join("|")
}

pub(crate) fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| VnDatesError::InvalidPattern(format!("'{}': {}", pattern, e)))
}
