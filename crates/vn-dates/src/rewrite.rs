//! Span bookkeeping shared by the resolvers.
//!
//! A stage collects replacements against its input text, refusing any span
//! that overlaps one already claimed, then splices them in a single pass.
//! Spans come from regex matches, so they always sit on UTF-8 boundaries.

use std::ops::Range;

use serde::Serialize;

/// Which resolver produced a substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Day,
    Week,
    Month,
}

/// One replaced span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitution {
    pub stage: Stage,
    /// Byte offset of the span in the stage's input text.
    pub start: usize,
    /// Byte offset one past the end of the span in the stage's input text.
    pub end: usize,
    /// The phrase as written in the input.
    pub original: String,
    /// The absolute date text that replaced it.
    pub replacement: String,
}

pub(crate) struct Rewriter<'t> {
    input: &'t str,
    claimed: Vec<Substitution>,
}

impl<'t> Rewriter<'t> {
    pub(crate) fn new(input: &'t str) -> Self {
        Self {
            input,
            claimed: Vec::new(),
        }
    }

    pub(crate) fn is_claimed(&self, span: &Range<usize>) -> bool {
        self.claimed
            .iter()
            .any(|s| span.start < s.end && s.start < span.end)
    }

    /// Claim `span` unless it overlaps an earlier claim.
    pub(crate) fn claim(&mut self, stage: Stage, span: Range<usize>, replacement: String) -> bool {
        if self.is_claimed(&span) {
            return false;
        }
        self.claimed.push(Substitution {
            stage,
            start: span.start,
            end: span.end,
            original: self.input[span].to_string(),
            replacement,
        });
        true
    }

    /// Splice every claim into the input, left to right.
    pub(crate) fn finish(mut self) -> (String, Vec<Substitution>) {
        if self.claimed.is_empty() {
            return (self.input.to_string(), self.claimed);
        }
        self.claimed.sort_by_key(|s| s.start);

        let mut out = String::with_capacity(self.input.len() + 16 * self.claimed.len());
        let mut cursor = 0;
        for sub in &self.claimed {
            out.push_str(&self.input[cursor..sub.start]);
            out.push_str(&sub.replacement);
            cursor = sub.end;
        }
        out.push_str(&self.input[cursor..]);
        (out, self.claimed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_without_claims_is_identity() {
        let (out, subs) = Rewriter::new("không có gì").finish();
        assert_eq!(out, "không có gì");
        assert!(subs.is_empty());
    }

    #[test]
    fn test_claims_splice_in_position_order() {
        let text = "a ngày mai b hôm nay c";
        let mut rw = Rewriter::new(text);
        let today = text.find("hôm nay").unwrap();
        let tomorrow = text.find("ngày mai").unwrap();
        assert!(rw.claim(Stage::Day, today..today + "hôm nay".len(), "X".into()));
        assert!(rw.claim(Stage::Day, tomorrow..tomorrow + "ngày mai".len(), "Y".into()));
        let (out, subs) = rw.finish();
        assert_eq!(out, "a Y b X c");
        assert_eq!(subs[0].original, "ngày mai");
        assert_eq!(subs[1].original, "hôm nay");
    }

    #[test]
    fn test_overlapping_claim_is_refused() {
        let text = "ngày mai";
        let mut rw = Rewriter::new(text);
        assert!(rw.claim(Stage::Day, 0..text.len(), "A".into()));
        let inner = text.find("mai").unwrap();
        assert!(!rw.claim(Stage::Day, inner..text.len(), "B".into()));
        assert_eq!(rw.finish().0, "A");
    }

    #[test]
    fn test_adjacent_claims_do_not_overlap() {
        let mut rw = Rewriter::new("abcd");
        assert!(rw.claim(Stage::Week, 0..2, "x".into()));
        assert!(rw.claim(Stage::Week, 2..4, "y".into()));
        assert_eq!(rw.finish().0, "xy");
    }
}
