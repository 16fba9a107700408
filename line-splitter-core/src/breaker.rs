//! Break point selection
//!
//! Given the visible text of one line and a width budget, pick the word
//! boundary where the line should be cut. Only a word that overflows and still
//! has text after it can trigger a cut: a line is never broken just to push its
//! last word down. The cut goes in front of that word, so the text before the
//! cut fits and no word is ever split.

use crate::segmenter::Segmenter;
use crate::width::WidthScorer;
use log::trace;

/// Outcome of a break search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakPoint {
    /// The whole text is within budget.
    Fits,
    /// Cut before the codepoint at this offset.
    At(usize),
    /// Over budget, but no word boundary can be used.
    NoBoundary,
}

/// Scores text and asks the segmenter for boundaries.
pub struct BreakFinder<'a> {
    scorer: &'a WidthScorer,
    segmenter: &'a dyn Segmenter,
}

impl<'a> BreakFinder<'a> {
    pub fn new(scorer: &'a WidthScorer, segmenter: &'a dyn Segmenter) -> Self {
        Self { scorer, segmenter }
    }

    /// Find the break for `plain` (token-stripped text) under `budget`.
    ///
    /// Terms are scanned left to right and the first one whose end exceeds the
    /// budget decides. If it is the last term there is no break. Otherwise the
    /// cut lands at its start, or right after it when nothing visible precedes
    /// it (a word too long for any line gets a line of its own).
    pub fn find(&self, plain: &str, budget: u32) -> BreakPoint {
        let total = self.scorer.score(plain);
        if total <= budget {
            return BreakPoint::Fits;
        }

        let len = plain.chars().count();
        let overflowing = self
            .segmenter
            .segment(plain)
            .into_iter()
            .find(|term| self.scorer.score_prefix(plain, term.end().min(len)) > budget);

        let Some(term) = overflowing else {
            return BreakPoint::NoBoundary;
        };
        let end = term.end();
        if end >= len {
            trace!("only the last word {:?} overflows", term.text);
            return BreakPoint::NoBoundary;
        }

        let offset = if has_visible_prefix(plain, term.offset) {
            term.offset
        } else {
            end
        };
        trace!(
            "break at {} around {:?} (score {} > {})",
            offset,
            term.text,
            total,
            budget
        );
        BreakPoint::At(offset)
    }
}

fn has_visible_prefix(plain: &str, offset: usize) -> bool {
    plain.chars().take(offset).any(|ch| !ch.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::{UnicodeWordSegmenter, WordTerm};
    use proptest::prelude::*;

    fn find(plain: &str, budget: u32) -> BreakPoint {
        let scorer = WidthScorer::default();
        BreakFinder::new(&scorer, &UnicodeWordSegmenter).find(plain, budget)
    }

    #[test]
    fn fits_within_budget() {
        assert_eq!(find("Hello", 5), BreakPoint::Fits);
        assert_eq!(find("", 0), BreakPoint::Fits);
    }

    #[test]
    fn cuts_before_the_overflowing_word() {
        // " Hello" is 6, " Hello " is 7, " Hello there" is 12.
        assert_eq!(find(" Hello there friend", 10), BreakPoint::At(7));
    }

    #[test]
    fn last_word_is_never_pushed_down() {
        assert_eq!(find("Hello there", 8), BreakPoint::NoBoundary);
        // "there" overflows but "friend" still follows it.
        assert_eq!(find("Hello there friend", 8), BreakPoint::At(6));
    }

    #[test]
    fn leftmost_boundary_wins() {
        assert_eq!(find("a b c d e f", 3), BreakPoint::At(3));
    }

    #[test]
    fn single_long_word_has_no_boundary() {
        assert_eq!(find("Supercalifragilistic", 8), BreakPoint::NoBoundary);
        assert_eq!(find("   Supercalifragilistic", 8), BreakPoint::NoBoundary);
    }

    #[test]
    fn overlong_first_word_gets_its_own_line() {
        assert_eq!(find("Supercalifragilistic is long", 8), BreakPoint::At(20));
        assert_eq!(find("  Supercalifragilistic is long", 8), BreakPoint::At(22));
    }

    #[test]
    fn cjk_breaks_between_characters() {
        // Each ideograph scores 2.
        assert_eq!(find("你好世界和平", 6), BreakPoint::At(3));
    }

    #[test]
    fn cjk_never_starts_a_line_with_a_comma() {
        // "你好，" would end at 6 > 5, so the cut moves in front of "好，".
        assert_eq!(find("你好，世界", 5), BreakPoint::At(1));
    }

    #[test]
    fn empty_segmentation_is_no_boundary() {
        let scorer = WidthScorer::default();
        let nothing = |_: &str| Vec::<WordTerm>::new();
        let finder = BreakFinder::new(&scorer, &nothing);
        assert_eq!(finder.find("too long for budget", 4), BreakPoint::NoBoundary);
    }

    proptest! {
        #[test]
        fn break_is_a_word_start_and_prefix_fits(
            words in proptest::collection::vec("[a-z]{1,6}|[你好世界]{1,3}", 1..12),
            budget in 4u32..30,
        ) {
            let plain = words.join(" ");
            let scorer = WidthScorer::default();
            let terms = UnicodeWordSegmenter.segment(&plain);
            let len = plain.chars().count();
            match BreakFinder::new(&scorer, &UnicodeWordSegmenter).find(&plain, budget) {
                BreakPoint::At(offset) => {
                    prop_assert!(terms.iter().any(|t| t.offset == offset));
                    prop_assert!(terms.iter().any(|t| t.end() == offset));
                    prop_assert!(offset < len);
                    if scorer.score_prefix(&plain, offset) > budget {
                        // Only a single overlong word may be left over budget.
                        let words = terms
                            .iter()
                            .filter(|t| t.end() <= offset && !t.text.trim().is_empty())
                            .count();
                        prop_assert_eq!(words, 1);
                    }
                }
                BreakPoint::Fits => prop_assert!(scorer.score(&plain) <= budget),
                BreakPoint::NoBoundary => {
                    let first_over = terms
                        .iter()
                        .find(|t| scorer.score_prefix(&plain, t.end()) > budget)
                        .unwrap();
                    prop_assert_eq!(first_over.end(), len);
                }
            }
        }
    }
}
