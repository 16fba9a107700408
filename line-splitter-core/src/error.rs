//! Error types

use thiserror::Error;

/// Why a message could not be brought under budget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// The whole key fails and keeps its original value.
    #[error("still over budget after {passes} passes")]
    RecursionLimit { passes: usize },

    /// One line stays over budget; the rest of the message is still split.
    #[error("segment {segment} scores {score} (budget {budget}) and has no usable word boundary")]
    NoBoundary {
        segment: usize,
        score: u32,
        budget: u32,
    },
}
