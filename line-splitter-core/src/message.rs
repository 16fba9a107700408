//! Message classification
//!
//! Decides from a raw value whether it is skipped, left alone, or split, and
//! with which budget, marker and continuation prefix.

use crate::config::SplitterConfig;
use crate::splitter::LineLayout;
use regex::Regex;
use std::sync::LazyLock;

/// Chat lines open with a style code, optionally flagged with `*`.
static TALK_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\\[A-Za-z0-9]{2}(\*)?").expect("talk header regex should compile"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Chat line, starts with a style code.
    Talk,
    /// Access/menu line, starts with `*` or ` *`.
    Access,
}

/// What to do with one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Contains the escape character; never touched.
    Skip,
    /// Not a message kind we rewrap.
    Untouched,
    Split { kind: MessageKind, layout: LineLayout },
}

pub fn classify(value: &str, config: &SplitterConfig) -> Classification {
    if value.contains(config.escape) {
        return Classification::Skip;
    }

    if value.starts_with('*') || value.starts_with(" *") {
        let layout = LineLayout::new(config.access_budget, config.access_marker)
            .with_prefix(config.prefix.clone());
        return Classification::Split {
            kind: MessageKind::Access,
            layout,
        };
    }

    if let Some(header) = TALK_HEADER.captures(value) {
        let mut layout = LineLayout::new(config.talk_budget, config.talk_marker);
        if header.get(1).is_some() {
            layout = layout.with_prefix(config.prefix.clone());
        }
        return Classification::Split {
            kind: MessageKind::Talk,
            layout,
        };
    }

    Classification::Untouched
}
