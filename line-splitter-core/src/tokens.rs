//! Inline formatting tokens
//!
//! Game strings carry zero-width codes that must survive a rewrap untouched:
//! style codes (`\` followed by two alphanumerics, e.g. `\C1`) and placeholder
//! codes (`~` or `^` followed by a digit). A segment may also end with a suffix
//! marker (`/` or `/%`) that has to stay at the very end of its line.
//!
//! Extraction strips the tokens and remembers where they were, measured in
//! codepoints of the stripped text. Style codes are stripped first and
//! placeholders are matched against the style-free text, so each table lives
//! in its own coordinate space and reinsertion unwinds them in reverse order.

use regex::Regex;
use std::sync::LazyLock;

static STYLE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[A-Za-z0-9]{2}").expect("style token regex should compile"));

static PLACEHOLDER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[~^][0-9]").expect("placeholder regex should compile"));

static SUFFIX_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/%?$").expect("suffix regex should compile"));

/// Kinds of zero-width codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Style,
    Placeholder,
}

impl TokenKind {
    fn pattern(self) -> &'static Regex {
        match self {
            TokenKind::Style => &*STYLE_TOKEN,
            TokenKind::Placeholder => &*PLACEHOLDER_TOKEN,
        }
    }
}

/// All style codes in `text`, left to right, with their byte ranges.
pub fn style_tokens(text: &str) -> impl Iterator<Item = regex::Match<'_>> {
    STYLE_TOKEN.find_iter(text)
}

/// A token and the codepoint offset it occupied in the stripped text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatToken {
    pub offset: usize,
    pub text: String,
}

/// Ordered `(offset, token)` pairs for one token kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTable {
    entries: Vec<FormatToken>,
}

impl TokenTable {
    /// Strips every token of `kind` from `text`.
    ///
    /// Returns the table and the stripped text. Offsets are non-decreasing.
    pub fn extract(text: &str, kind: TokenKind) -> (Self, String) {
        let mut entries = Vec::new();
        let mut stripped = String::with_capacity(text.len());
        let mut stripped_chars = 0;
        let mut last = 0;

        for found in kind.pattern().find_iter(text) {
            let between = &text[last..found.start()];
            stripped.push_str(between);
            stripped_chars += between.chars().count();
            entries.push(FormatToken {
                offset: stripped_chars,
                text: found.as_str().to_string(),
            });
            last = found.end();
        }
        stripped.push_str(&text[last..]);

        (Self { entries }, stripped)
    }

    /// Puts the tokens back into `text`.
    ///
    /// `text` is the stripped text with `inserted_len` codepoints inserted at
    /// `insert_at`. Tokens at or before `insert_at` go back unshifted (so they
    /// land before the inserted text), later ones move right by `inserted_len`.
    /// Returns the rebuilt text and the offset where the inserted text now
    /// starts.
    pub fn reinsert(&self, text: &str, insert_at: usize, inserted_len: usize) -> (String, usize) {
        if self.entries.is_empty() {
            return (text.to_string(), insert_at);
        }

        let mut chars: Vec<char> = text.chars().collect();
        let mut added = 0;
        let mut moved_insert = insert_at;

        for token in &self.entries {
            let shift = if token.offset > insert_at { inserted_len } else { 0 };
            let pos = (token.offset + added + shift).min(chars.len());
            let len = token.text.chars().count();
            chars.splice(pos..pos, token.text.chars());
            added += len;
            if token.offset <= insert_at {
                moved_insert += len;
            }
        }

        (chars.into_iter().collect(), moved_insert)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormatToken> {
        self.entries.iter()
    }
}

/// Splits a trailing `/` or `/%` off a segment.
pub fn split_suffix(segment: &str) -> (&str, &str) {
    match SUFFIX_MARKER.find(segment) {
        Some(found) => (&segment[..found.start()], found.as_str()),
        None => (segment, ""),
    }
}

/// One segment with its suffix and tokens removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSegment {
    /// Visible text, the only thing that gets scored and segmented.
    pub plain: String,
    /// Suffix marker, verbatim, or empty.
    pub suffix: String,
    style: TokenTable,
    placeholders: TokenTable,
}

impl ExtractedSegment {
    pub fn extract(segment: &str) -> Self {
        let (body, suffix) = split_suffix(segment);
        let (style, without_style) = TokenTable::extract(body, TokenKind::Style);
        let (placeholders, plain) = TokenTable::extract(&without_style, TokenKind::Placeholder);

        Self {
            plain,
            suffix: suffix.to_string(),
            style,
            placeholders,
        }
    }

    pub fn style(&self) -> &TokenTable {
        &self.style
    }

    pub fn placeholders(&self) -> &TokenTable {
        &self.placeholders
    }

    /// Inserts `insertion` at codepoint `offset` of the plain text, then puts
    /// the tokens and the suffix back.
    pub fn rebuild_with(&self, offset: usize, insertion: &str) -> String {
        let inserted_len = insertion.chars().count();
        let text = insert_at_char(&self.plain, offset, insertion);

        let (text, offset) = self.placeholders.reinsert(&text, offset, inserted_len);
        let (mut text, _) = self.style.reinsert(&text, offset, inserted_len);
        text.push_str(&self.suffix);
        text
    }

    /// The original segment.
    pub fn restore(&self) -> String {
        self.rebuild_with(0, "")
    }
}

/// Inserts `insertion` before the codepoint at `offset` (or at the end).
pub fn insert_at_char(text: &str, offset: usize, insertion: &str) -> String {
    let byte = text
        .char_indices()
        .nth(offset)
        .map_or(text.len(), |(byte, _)| byte);

    let mut out = String::with_capacity(text.len() + insertion.len());
    out.push_str(&text[..byte]);
    out.push_str(insertion);
    out.push_str(&text[byte..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn extracts_style_then_placeholders() {
        let seg = ExtractedSegment::extract(r"\C1Hi ~1there\C0/%");
        assert_eq!(seg.plain, "Hi there");
        assert_eq!(seg.suffix, "/%");

        let style: Vec<_> = seg.style().iter().map(|t| (t.offset, t.text.as_str())).collect();
        assert_eq!(style, vec![(0, r"\C1"), (10, r"\C0")]);

        let placeholders: Vec<_> = seg
            .placeholders()
            .iter()
            .map(|t| (t.offset, t.text.as_str()))
            .collect();
        assert_eq!(placeholders, vec![(3, "~1")]);
    }

    #[test]
    fn style_offsets_ignore_earlier_tokens() {
        let (table, stripped) = TokenTable::extract(r"ab\C1cd\C2\C3e", TokenKind::Style);
        assert_eq!(stripped, "abcde");
        let offsets: Vec<_> = table.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![2, 4, 4]);
    }

    #[test]
    fn suffix_only_at_end() {
        assert_eq!(split_suffix("abc/"), ("abc", "/"));
        assert_eq!(split_suffix("abc/%"), ("abc", "/%"));
        assert_eq!(split_suffix("a/b"), ("a/b", ""));
        assert_eq!(split_suffix("50%"), ("50%", ""));
    }

    #[test]
    fn inserted_text_lands_between_tokens() {
        let seg = ExtractedSegment::extract(r"\C1one two\C0/");
        assert_eq!(seg.plain, "one two");
        assert_eq!(seg.rebuild_with(4, "&"), r"\C1one &two\C0/");
    }

    #[test]
    fn token_at_insertion_point_stays_before_insertion() {
        let seg = ExtractedSegment::extract(r"one \C2two");
        assert_eq!(seg.rebuild_with(4, "& "), r"one \C2& two");
    }

    #[test]
    fn placeholder_before_insertion_moves_style_insertion_point() {
        let seg = ExtractedSegment::extract(r"~1ab\C3cd^2ef");
        assert_eq!(seg.plain, "abcdef");
        assert_eq!(seg.rebuild_with(4, "|"), r"~1ab\C3cd^2|ef");
        assert_eq!(seg.rebuild_with(3, "|"), r"~1ab\C3c|d^2ef");
    }

    #[test]
    fn token_glued_across_a_style_code_round_trips() {
        let seg = ExtractedSegment::extract(r"~\AA1x");
        assert_eq!(seg.plain, "x");
        assert_eq!(seg.restore(), r"~\AA1x");
    }

    #[test]
    fn insert_at_char_handles_multibyte() {
        assert_eq!(insert_at_char("你好吗", 1, "&"), "你&好吗");
        assert_eq!(insert_at_char("你好", 9, "&"), "你好&");
    }

    const TOKENISH: &str = r"(\\[A-Z0-9a-z]{2}|[~^][0-9]|[a-z 你好。/%\\~^&]){0,20}";

    proptest! {
        #[test]
        fn zero_length_reinsert_is_identity(s in TOKENISH, at in 0usize..32) {
            let seg = ExtractedSegment::extract(&s);
            prop_assert_eq!(seg.rebuild_with(at, ""), s);
        }

        #[test]
        fn removing_the_insertion_gives_the_original(s in TOKENISH, at in 0usize..32) {
            let seg = ExtractedSegment::extract(&s);
            let at = at.min(seg.plain.chars().count());
            let rebuilt = seg.rebuild_with(at, "\u{1}\u{2}");
            prop_assert_eq!(rebuilt.replacen("\u{1}\u{2}", "", 1), s);
        }
    }
}
