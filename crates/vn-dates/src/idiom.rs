//! Idiom detection.
//!
//! Vietnamese reuses day words in set phrases that mean "some unspecified
//! time": "mai mốt đi ăn nghe" is an invitation, not a date. When one of
//! these phrases appears anywhere in a message, no day-level substitution
//! is made for that message.

use regex::RegexSet;

use crate::error::{Result, VnDatesError};
use crate::rules::{phrase_pattern, IDIOMS};

#[derive(Debug, Clone)]
pub struct IdiomGuard {
    matchers: RegexSet,
}

impl IdiomGuard {
    /// Compile the idiom table into a single case-insensitive set.
    ///
    /// # Errors
    ///
    /// Returns [`VnDatesError::InvalidPattern`] if the table fails to compile.
    pub fn new() -> Result<Self> {
        let patterns = IDIOMS
            .iter()
            .map(|idiom| format!(r"(?i)\b{}\b", phrase_pattern(idiom)));
        let matchers = RegexSet::new(patterns)
            .map_err(|e| VnDatesError::InvalidPattern(format!("idiom table: {}", e)))?;
        Ok(Self { matchers })
    }

    /// The first idiom (in table order) present in `text`.
    pub fn detect(&self, text: &str) -> Option<&'static str> {
        self.matchers
            .matches(text)
            .iter()
            .next()
            .map(|index| IDIOMS[index])
    }

    /// Whether any idiom appears in `text`.
    pub fn contains(&self, text: &str) -> bool {
        self.matchers.is_match(text)
    }
}
