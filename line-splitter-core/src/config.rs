//! Splitter settings
//!
//! Defaults reproduce the in-game calibration: narrow glyphs weigh 2, wide
//! glyphs 3, chat lines hold 45 units and access/menu lines 54.

use crate::width::WidthScorer;
use serde::{Deserialize, Serialize};

/// Settings shared by every key of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    // Width scoring
    pub narrow_weight: u32,
    pub wide_weight: u32,

    // Budgets per message kind
    pub talk_budget: u32,
    pub access_budget: u32,

    // Markers
    pub talk_marker: char,
    pub access_marker: char,
    pub escape: char,
    /// Inserted after the break marker when a message kind asks for a
    /// continuation prefix.
    pub prefix: String,

    // Limits
    pub max_passes: usize,
    /// More segments than this produce a warning.
    pub max_segments: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            narrow_weight: 2,
            wide_weight: 3,

            talk_budget: 45,
            access_budget: 54,

            talk_marker: '&',
            access_marker: '&',
            escape: '#',
            prefix: " ".to_string(),

            max_passes: 64,
            max_segments: 3,
        }
    }
}

impl SplitterConfig {
    pub fn scorer(&self) -> WidthScorer {
        WidthScorer::new(self.narrow_weight, self.wide_weight)
    }

    /// Set budgets and width weights in one go.
    pub fn set_options(
        &mut self,
        talk_budget: u32,
        access_budget: u32,
        narrow_weight: u32,
        wide_weight: u32,
    ) {
        self.talk_budget = talk_budget;
        self.access_budget = access_budget;
        self.narrow_weight = narrow_weight;
        self.wide_weight = wide_weight;
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }
}
