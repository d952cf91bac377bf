//! Lexical classification seam
//!
//! Tokenizers live outside this workspace. They only have to report which
//! coarse token group an offset falls in.

use alloc::vec::Vec;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::view::TextView;

/// Coarse token group at an offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum TokenGroup {
    Code,
    String,
    LineComment,
    BlockComment,
    DocComment,
}

/// Classifies the token at an offset
pub trait LexicalClassifier {
    /// Token group at `offset`, or `None` for a group nothing maps to
    fn token_group_at(&self, view: &dyn TextView, offset: usize) -> Option<TokenGroup>;
}

/// Classifier backed by a table of `[start, end)` spans
///
/// Offsets outside every span report `fallback`. Spans are checked in
/// insertion order; the first hit wins. An offset equal to a span's end is
/// still inside it, which matches a caret sitting right after the last
/// character of a token.
#[derive(Debug, Clone, Default)]
pub struct SpanClassifier {
    spans: Vec<(usize, usize, Option<TokenGroup>)>,
    fallback: Option<TokenGroup>,
}

impl SpanClassifier {
    /// Classifier where everything is code unless a span says otherwise
    pub fn code() -> Self {
        Self {
            spans: Vec::new(),
            fallback: Some(TokenGroup::Code),
        }
    }

    pub fn with_span(mut self, start: usize, end: usize, group: Option<TokenGroup>) -> Self {
        self.spans.push((start, end, group));
        self
    }

    pub fn with_fallback(mut self, fallback: Option<TokenGroup>) -> Self {
        self.fallback = fallback;
        self
    }
}

impl LexicalClassifier for SpanClassifier {
    fn token_group_at(&self, _view: &dyn TextView, offset: usize) -> Option<TokenGroup> {
        self.spans
            .iter()
            .find(|(start, end, _)| offset > *start && offset <= *end)
            .map(|(_, _, group)| *group)
            .unwrap_or(self.fallback)
    }
}
