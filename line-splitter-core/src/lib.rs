//! Line Splitter Core
//!
//! Rewraps short game UI strings (chat lines, menu text) so that no rendered
//! line exceeds a width budget, keeping inline style codes, placeholder codes
//! and trailing suffix markers intact. Line breaks go on word boundaries, found
//! through a pluggable [`Segmenter`].
//!
//! The crate works on `(key, value)` pairs and never touches files; reading and
//! writing the JSON tables is up to the caller.

pub mod batch;
pub mod breaker;
pub mod config;
pub mod continuity;
pub mod error;
pub mod message;
pub mod segmenter;
pub mod splitter;
pub mod tokens;
pub mod width;

// Re-export commonly used functions and types
pub use batch::{BatchOutput, BatchReport, DiagnosticKind, EntryOutcome, KeyDiagnostic};
pub use breaker::{BreakFinder, BreakPoint};
pub use config::SplitterConfig;
pub use continuity::fix_color_continuity;
pub use error::SplitError;
pub use message::{classify, Classification, MessageKind};
pub use segmenter::{Segmenter, UnicodeWordSegmenter, WordTerm};
pub use splitter::{LineLayout, LineSplitter, PassState, Split};
pub use tokens::{ExtractedSegment, FormatToken, TokenKind, TokenTable};
pub use width::WidthScorer;
