//! Width estimation for token-stripped text
//!
//! The game font renders a fixed set of ASCII characters narrow and every other
//! codepoint (CJK, full-width punctuation, symbols) wide. The score is only ever
//! compared against a budget, it is not a pixel measurement.

use serde::{Deserialize, Serialize};

/// Per-codepoint width units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidthScorer {
    /// Units for characters in the narrow class.
    pub narrow: u32,
    /// Units for everything else.
    pub wide: u32,
}

impl Default for WidthScorer {
    fn default() -> Self {
        Self { narrow: 1, wide: 2 }
    }
}

impl WidthScorer {
    pub fn new(narrow: u32, wide: u32) -> Self {
        Self { narrow, wide }
    }

    /// Width of a single codepoint.
    pub fn char_width(&self, ch: char) -> u32 {
        if is_narrow(ch) {
            self.narrow
        } else {
            self.wide
        }
    }

    /// Width of a whole string. Additive over concatenation.
    pub fn score(&self, text: &str) -> u32 {
        text.chars().map(|ch| self.char_width(ch)).sum()
    }

    /// Width of the first `chars` codepoints of `text`.
    pub fn score_prefix(&self, text: &str, chars: usize) -> u32 {
        text.chars().take(chars).map(|ch| self.char_width(ch)).sum()
    }
}

/// Characters the game font draws at half width.
pub fn is_narrow(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            ' ' | '|'
                | '!'
                | '@'
                | '#'
                | '$'
                | '%'
                | '^'
                | '&'
                | '*'
                | '('
                | ')'
                | '['
                | ']'
                | ','
                | '.'
                | '/'
                | ':'
                | ';'
        )
}
