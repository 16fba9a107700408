//! Splitting driver
//!
//! One pass walks the message's existing lines left to right and cuts the first
//! over-budget line that has a usable boundary. Lines without one are noted and
//! passed over, so the lines after them are still cut. Passes repeat until one
//! makes no cut. Every cut leaves non-empty visible text on both sides, so the
//! loop ends on its own; `max_passes` is the guard for inputs that keep it
//! going longer than any game string should.

use crate::breaker::{BreakFinder, BreakPoint};
use crate::config::SplitterConfig;
use crate::continuity::fix_color_continuity;
use crate::error::SplitError;
use crate::segmenter::{Segmenter, UnicodeWordSegmenter};
use crate::tokens::ExtractedSegment;
use crate::width::WidthScorer;
use log::debug;

/// How lines of one message are measured and joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineLayout {
    pub budget: u32,
    pub marker: char,
    /// Continuation prefix placed after each inserted marker.
    pub prefix: Option<String>,
}

impl LineLayout {
    pub fn new(budget: u32, marker: char) -> Self {
        Self {
            budget,
            marker,
            prefix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Text inserted at a break, given the plain text and break offset.
    ///
    /// With a prefix, an extra space is added unless the line being pushed
    /// down already starts with one.
    fn insertion(&self, plain: &str, offset: usize) -> String {
        let mut insertion = String::from(self.marker);
        if let Some(prefix) = &self.prefix {
            if plain.chars().nth(offset) != Some(' ') {
                insertion.push(' ');
            }
            insertion.push_str(prefix);
        }
        insertion
    }
}

/// A finished split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub text: String,
    /// Number of passes that inserted a break.
    pub passes: usize,
    /// Lines of `text` still over budget, as [`SplitError::NoBoundary`].
    pub unsplit: Vec<SplitError>,
}

impl Split {
    /// Number of lines, not counting empty trailing ones.
    pub fn segment_count(&self, marker: char) -> usize {
        self.text.trim_end_matches(marker).split(marker).count()
    }
}

/// Result of a single pass over a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassState {
    /// One line was cut; this is the recomposed message.
    Edited(String),
    /// Nothing left to cut. Lines still over budget are listed.
    Done(Vec<SplitError>),
}

/// Rewraps messages so no line exceeds its budget.
pub struct LineSplitter {
    config: SplitterConfig,
    scorer: WidthScorer,
    segmenter: Box<dyn Segmenter>,
}

impl LineSplitter {
    pub fn new(config: SplitterConfig) -> Self {
        Self::with_segmenter(config, UnicodeWordSegmenter)
    }

    pub fn with_segmenter(config: SplitterConfig, segmenter: impl Segmenter + 'static) -> Self {
        let scorer = config.scorer();
        Self {
            config,
            scorer,
            segmenter: Box::new(segmenter),
        }
    }

    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    pub fn scorer(&self) -> &WidthScorer {
        &self.scorer
    }

    /// Split `message` until every line fits `layout.budget` or has no
    /// usable boundary.
    ///
    /// Only running out of passes is an error; lines that could not be cut
    /// are reported in [`Split::unsplit`].
    pub fn split(&self, message: &str, layout: &LineLayout) -> Result<Split, SplitError> {
        let mut text = message.to_string();
        let mut passes = 0;

        loop {
            match self.pass(&text, layout) {
                PassState::Done(unsplit) => {
                    return Ok(Split {
                        text,
                        passes,
                        unsplit,
                    })
                }
                PassState::Edited(next) => {
                    passes += 1;
                    if passes > self.config.max_passes {
                        return Err(SplitError::RecursionLimit {
                            passes: self.config.max_passes,
                        });
                    }
                    text = fix_color_continuity(&next, layout.marker, self.config.escape);
                    debug!("pass {}: {:?}", passes, text);
                }
            }
        }
    }

    /// Cut the first overflowing line of `text` that can be cut, if any.
    pub fn pass(&self, text: &str, layout: &LineLayout) -> PassState {
        let finder = BreakFinder::new(&self.scorer, self.segmenter.as_ref());
        let segments: Vec<&str> = text.split(layout.marker).collect();
        let mut unsplit = Vec::new();

        for (index, segment) in segments.iter().enumerate() {
            let extracted = ExtractedSegment::extract(segment);

            let offset = match finder.find(&extracted.plain, layout.budget) {
                BreakPoint::Fits => continue,
                BreakPoint::At(offset) => offset,
                BreakPoint::NoBoundary => {
                    unsplit.push(SplitError::NoBoundary {
                        segment: index,
                        score: self.scorer.score(&extracted.plain),
                        budget: layout.budget,
                    });
                    continue;
                }
            };

            let insertion = layout.insertion(&extracted.plain, offset);
            let edited = extracted.rebuild_with(offset, &insertion);

            let mut composed = String::with_capacity(text.len() + insertion.len());
            for (i, original) in segments.iter().enumerate() {
                if i > 0 {
                    composed.push(layout.marker);
                }
                if i == index {
                    composed.push_str(&edited);
                } else {
                    composed.push_str(original);
                }
            }

            return PassState::Edited(composed);
        }

        PassState::Done(unsplit)
    }
}
