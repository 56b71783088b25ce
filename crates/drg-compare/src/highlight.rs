//! Character-level highlighting for description changes.
//!
//! Aligns the old and new strings with an LCS diff and returns both sides
//! as span sequences with the differing runs marked: deletions on the old
//! side, insertions on the new side, replacements on both. Rendering
//! (colors, markers) is left to the caller.

use serde::{Deserialize, Serialize};
use similar::{DiffOp, TextDiff};

/// A run of characters that is either shared or specific to one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkedSpan {
    pub text: String,
    /// True when this run differs from the other side.
    pub changed: bool,
}

/// One side of a highlighted pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkedText {
    spans: Vec<MarkedSpan>,
}

impl MarkedText {
    fn push(&mut self, text: String, changed: bool) {
        if !text.is_empty() {
            self.spans.push(MarkedSpan { text, changed });
        }
    }

    pub fn spans(&self) -> &[MarkedSpan] {
        &self.spans
    }

    /// The side's text with marks stripped.
    pub fn plain(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    /// True when no span is marked.
    pub fn is_unmarked(&self) -> bool {
        self.spans.iter().all(|span| !span.changed)
    }
}

/// Align two description strings and mark the runs that differ.
pub fn highlight(old: &str, new: &str) -> (MarkedText, MarkedText) {
    let old_chars: Vec<char> = old.chars().collect();
    let new_chars: Vec<char> = new.chars().collect();

    let mut old_marked = MarkedText::default();
    let mut new_marked = MarkedText::default();

    // DiffOp indices are char offsets because the diff is built from_chars.
    let diff = TextDiff::from_chars(old, new);
    for op in diff.ops() {
        match *op {
            DiffOp::Equal { old_index, new_index, len } => {
                old_marked.push(old_chars[old_index..old_index + len].iter().collect(), false);
                new_marked.push(new_chars[new_index..new_index + len].iter().collect(), false);
            }
            DiffOp::Delete { old_index, old_len, .. } => {
                old_marked.push(old_chars[old_index..old_index + old_len].iter().collect(), true);
            }
            DiffOp::Insert { new_index, new_len, .. } => {
                new_marked.push(new_chars[new_index..new_index + new_len].iter().collect(), true);
            }
            DiffOp::Replace { old_index, old_len, new_index, new_len } => {
                old_marked.push(old_chars[old_index..old_index + old_len].iter().collect(), true);
                new_marked.push(new_chars[new_index..new_index + new_len].iter().collect(), true);
            }
        }
    }

    (old_marked, new_marked)
}
