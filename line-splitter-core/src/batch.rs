//! Batch processing
//!
//! Runs every `(key, value)` pair through classification and splitting, one
//! key at a time. Nothing that goes wrong with one key stops the batch. A key
//! that runs out of passes keeps its original value; a line that cannot be cut
//! is left as is while the rest of the value is rewritten. Either way a
//! diagnostic names the key.

use crate::error::SplitError;
use crate::message::{classify, Classification};
use crate::splitter::LineSplitter;
use log::warn;
use std::fmt;

/// What happened to one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Rewritten {
        segments: usize,
        passes: usize,
        /// Lines left over budget.
        unsplit: Vec<SplitError>,
    },
    Skipped,
    Untouched,
    Failed(SplitError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The value now spans more lines than the configured limit.
    TooManySegments { segments: usize, limit: usize },
    /// One line has no usable boundary and stays over budget.
    Unsplit(SplitError),
    /// The value could not be split; it was kept as is.
    Failed(SplitError),
}

/// A diagnostic tied to the key that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDiagnostic {
    pub key: String,
    pub kind: DiagnosticKind,
}

impl KeyDiagnostic {
    pub fn is_failure(&self) -> bool {
        matches!(self.kind, DiagnosticKind::Failed(_))
    }
}

impl fmt::Display for KeyDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::TooManySegments { segments, limit } => {
                write!(f, "{}: {} lines (more than {})", self.key, segments, limit)
            }
            DiagnosticKind::Unsplit(err) => write!(f, "{}: {}", self.key, err),
            DiagnosticKind::Failed(err) => write!(f, "{}: left unchanged, {}", self.key, err),
        }
    }
}

/// Counts and diagnostics for a whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub rewritten: usize,
    pub changed: usize,
    pub skipped: usize,
    pub untouched: usize,
    pub failed: usize,
    pub diagnostics: Vec<KeyDiagnostic>,
}

impl BatchReport {
    pub fn warnings(&self) -> impl Iterator<Item = &KeyDiagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_failure())
    }

    pub fn failures(&self) -> impl Iterator<Item = &KeyDiagnostic> {
        self.diagnostics.iter().filter(|d| d.is_failure())
    }

    pub fn total(&self) -> usize {
        self.rewritten + self.skipped + self.untouched + self.failed
    }
}

/// Rewritten pairs, in input order, plus the report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutput {
    pub entries: Vec<(String, String)>,
    pub report: BatchReport,
}

impl LineSplitter {
    /// Classify and split one value.
    ///
    /// Failed values come back unchanged.
    pub fn process_value(&self, value: &str) -> (String, EntryOutcome) {
        let (kind, layout) = match classify(value, self.config()) {
            Classification::Skip => return (value.to_string(), EntryOutcome::Skipped),
            Classification::Untouched => return (value.to_string(), EntryOutcome::Untouched),
            Classification::Split { kind, layout } => (kind, layout),
        };

        match self.split(value, &layout) {
            Ok(split) => {
                let segments = split.segment_count(layout.marker);
                log::trace!("{:?} message split in {} passes", kind, split.passes);
                let outcome = EntryOutcome::Rewritten {
                    segments,
                    passes: split.passes,
                    unsplit: split.unsplit,
                };
                (split.text, outcome)
            }
            Err(err) => (value.to_string(), EntryOutcome::Failed(err)),
        }
    }

    /// Process every pair, keeping input order.
    pub fn process_batch<I, K, V>(&self, entries: I) -> BatchOutput
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut output = BatchOutput::default();

        for (key, value) in entries {
            let key = key.into();
            let original = value.as_ref();
            let (rewritten, outcome) = self.process_value(original);
            let report = &mut output.report;

            match outcome {
                EntryOutcome::Rewritten {
                    segments,
                    passes,
                    unsplit,
                } => {
                    report.rewritten += 1;
                    if passes > 0 {
                        report.changed += 1;
                    }
                    let limit = self.config().max_segments;
                    if segments > limit {
                        warn!("key {} breaks into {} lines", key, segments);
                        report.diagnostics.push(KeyDiagnostic {
                            key: key.clone(),
                            kind: DiagnosticKind::TooManySegments { segments, limit },
                        });
                    }
                    for err in unsplit {
                        warn!("key {}: {}", key, err);
                        report.diagnostics.push(KeyDiagnostic {
                            key: key.clone(),
                            kind: DiagnosticKind::Unsplit(err),
                        });
                    }
                }
                EntryOutcome::Skipped => report.skipped += 1,
                EntryOutcome::Untouched => report.untouched += 1,
                EntryOutcome::Failed(err) => {
                    warn!("key {} left unchanged: {}", key, err);
                    report.failed += 1;
                    report.diagnostics.push(KeyDiagnostic {
                        key: key.clone(),
                        kind: DiagnosticKind::Failed(err),
                    });
                }
            }

            output.entries.push((key, rewritten));
        }

        output
    }
}
