//! Word segmentation
//!
//! The break finder only needs word boundaries, so segmentation sits behind the
//! [`Segmenter`] trait. [`UnicodeWordSegmenter`] is the default: UAX #29 word
//! bounds, with closing punctuation glued to the word before it and opening
//! brackets glued to the word after, so a line never starts with `，` or ends
//! with `「`.

use unicode_segmentation::UnicodeSegmentation;

/// One word and its codepoint offset in the segmented text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordTerm {
    pub text: String,
    pub offset: usize,
}

impl WordTerm {
    pub fn new(text: impl Into<String>, offset: usize) -> Self {
        Self {
            text: text.into(),
            offset,
        }
    }

    /// Codepoint offset just past the word.
    pub fn end(&self) -> usize {
        self.offset + self.text.chars().count()
    }
}

/// Splits plain text into ordered word terms.
///
/// Implementations must be deterministic. Offsets are codepoints, the same
/// unit the width scorer walks.
pub trait Segmenter {
    fn segment(&self, text: &str) -> Vec<WordTerm>;
}

impl<F> Segmenter for F
where
    F: Fn(&str) -> Vec<WordTerm>,
{
    fn segment(&self, text: &str) -> Vec<WordTerm> {
        self(text)
    }
}

/// UAX #29 word boundaries with CJK punctuation rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordSegmenter;

impl Segmenter for UnicodeWordSegmenter {
    fn segment(&self, text: &str) -> Vec<WordTerm> {
        let mut terms: Vec<WordTerm> = Vec::new();
        let mut offset = 0;
        let mut glue_next = false;

        for word in text.split_word_bounds() {
            let len = word.chars().count();

            let attach = glue_next || word.chars().all(is_closing_punctuation);
            match terms.last_mut() {
                Some(last) if attach => last.text.push_str(word),
                _ => terms.push(WordTerm::new(word, offset)),
            }

            glue_next = word.chars().all(is_opening_punctuation);
            offset += len;
        }

        terms
    }
}

/// Punctuation that must not start a line.
pub fn is_closing_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '，' | '。'
            | '、'
            | '；'
            | '：'
            | '？'
            | '！'
            | '」'
            | '』'
            | '）'
            | '》'
            | '…'
            | ','
            | '.'
            | ';'
            | ':'
            | '!'
            | '?'
            | ')'
    )
}

/// Punctuation that must not end a line.
pub fn is_opening_punctuation(ch: char) -> bool {
    matches!(ch, '「' | '『' | '（' | '《' | '(')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(terms: &[WordTerm]) -> Vec<&str> {
        terms.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn latin_words_and_spaces() {
        let terms = UnicodeWordSegmenter.segment("Hello there friend");
        assert_eq!(texts(&terms), vec!["Hello", " ", "there", " ", "friend"]);
        let offsets: Vec<_> = terms.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![0, 5, 6, 11, 12]);
        assert_eq!(terms[4].end(), 18);
    }

    #[test]
    fn offsets_are_codepoints() {
        let terms = UnicodeWordSegmenter.segment("你好 ab");
        assert_eq!(texts(&terms), vec!["你", "好", " ", "ab"]);
        assert_eq!(terms[3].offset, 3);
    }

    #[test]
    fn closing_punctuation_sticks_to_previous_word() {
        let terms = UnicodeWordSegmenter.segment("你好，世界。");
        assert_eq!(texts(&terms), vec!["你", "好，", "世", "界。"]);
        assert_eq!(terms[2].offset, 3);
    }

    #[test]
    fn opening_bracket_sticks_to_next_word() {
        let terms = UnicodeWordSegmenter.segment("说「好」");
        assert_eq!(texts(&terms), vec!["说", "「好」"]);
    }

    #[test]
    fn terms_cover_the_text() {
        let text = "\u{2003}Hi, 这是（测试）!";
        let terms = UnicodeWordSegmenter.segment(text);
        let joined: String = terms.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, text);
        for pair in terms.windows(2) {
            assert_eq!(pair[0].end(), pair[1].offset);
        }
    }

    #[test]
    fn closures_are_segmenters() {
        let fixed = |_: &str| vec![WordTerm::new("ab", 0)];
        assert_eq!(fixed.segment("whatever"), vec![WordTerm::new("ab", 0)]);
    }
}
