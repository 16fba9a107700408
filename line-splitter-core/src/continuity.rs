//! Color continuity across inserted breaks
//!
//! When a break lands inside a colored run, the text after the break relies on
//! the engine carrying the color over, and the run's closing restatement of the
//! same code comes too late. The fix carries the code to the start of the new
//! line and drops the restatement:
//!
//! `\C1red text&more red\C1 rest` becomes `\C1red text&\C1more red rest`.
//!
//! Matches are resolved leftmost first. After each fix the scan resumes at the
//! carried code, so a run spanning several breaks is carried line by line.

use crate::tokens::style_tokens;
use log::debug;

/// Carry interrupted color runs across break markers.
///
/// `escape` counts as a break too.
pub fn fix_color_continuity(text: &str, marker: char, escape: char) -> String {
    let mut text = text.to_string();
    let mut from = 0;

    while let Some(run) = find_interrupted_run(&text, from, marker, escape) {
        debug!("carrying {} across break at byte {}", run.token, run.line_start);
        text = run.apply(&text);
        from = run.line_start;
    }

    text
}

/// A style code, a break, then the same code again with no other code between.
#[derive(Debug, Clone, PartialEq, Eq)]
struct InterruptedRun {
    token: String,
    /// Byte offset just past the break marker.
    line_start: usize,
    /// Byte range of the redundant restatement.
    repeat_start: usize,
    repeat_end: usize,
}

impl InterruptedRun {
    fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        out.push_str(&text[..self.line_start]);
        out.push_str(&self.token);
        out.push_str(&text[self.line_start..self.repeat_start]);
        out.push_str(&text[self.repeat_end..]);
        out
    }
}

fn find_interrupted_run(text: &str, from: usize, marker: char, escape: char) -> Option<InterruptedRun> {
    let tokens: Vec<_> = style_tokens(text).filter(|m| m.start() >= from).collect();

    for pair in tokens.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        if first.as_str() != second.as_str() {
            continue;
        }

        let between = &text[first.end()..second.start()];
        if between.contains('\\') {
            continue;
        }

        let Some((rel, found)) = between
            .char_indices()
            .find(|&(_, ch)| ch == marker || ch == escape)
        else {
            continue;
        };

        let line_start = first.end() + rel + found.len_utf8();
        let carried = &text[line_start..second.start()];
        if carried.trim_start_matches(' ').is_empty() {
            // Already leads its line.
            continue;
        }

        return Some(InterruptedRun {
            token: first.as_str().to_string(),
            line_start,
            repeat_start: second.start(),
            repeat_end: second.end(),
        });
    }

    None
}
