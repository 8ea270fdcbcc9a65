// src/rule.rs
//
// Rule records and the fixed-point driver shared by every pass.
//
// - A rule is a case-insensitive pattern plus a replacement template (`${n}` refers to
//   capture groups). Rules are compiled once and never hold state.
// - `Rule::apply` reports whether the buffer actually changed, so loops decide on an
//   explicit flag rather than by snapshotting the buffer.
// - `converge` repeats a round until it reports no change, and gives up with
//   `ConversionError::DidNotConverge` once the ceiling is reached.

use std::borrow::Cow;

use regex::{Regex, RegexBuilder};
use tracing::{debug, trace, warn};

use crate::error::ConversionError;

#[derive(Debug)]
pub struct Rule {
    name: &'static str,
    regex: Regex,
    replacement: String,
}

impl Rule {
    /// Compiles `pattern` case-insensitively.
    ///
    /// Panics if the pattern is invalid; rules are only built from hard-coded
    /// patterns inside `LazyLock` initialisers.
    pub fn new(name: &'static str, pattern: &str, replacement: impl Into<String>) -> Self {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .unwrap_or_else(|e| panic!("rule `{name}`: invalid pattern: {e}"));
        Self {
            name,
            regex,
            replacement: replacement.into(),
        }
    }

    /// Replaces every non-overlapping match in `buf`. Returns `true` if the buffer
    /// contents differ afterwards.
    pub fn apply(&self, buf: &mut String) -> bool {
        let next = match self.regex.replace_all(buf.as_str(), self.replacement.as_str()) {
            Cow::Borrowed(_) => return false,
            Cow::Owned(next) => next,
        };
        if next == *buf {
            return false;
        }
        trace!(rule = self.name, "rewrote buffer");
        *buf = next;
        true
    }
}

/// Applies `rules` in order, each exactly once. Returns `true` if any of them
/// changed the buffer.
pub fn apply_all(rules: &[Rule], buf: &mut String) -> bool {
    let mut changed = false;
    for rule in rules {
        changed |= rule.apply(buf);
    }
    changed
}

/// Runs `round` until it returns `false`, at most `max_rounds` times.
///
/// Returns the number of rounds executed, including the final unchanged one.
pub fn converge<F>(
    pass: &'static str,
    max_rounds: usize,
    buf: &mut String,
    mut round: F,
) -> Result<usize, ConversionError>
where
    F: FnMut(&mut String) -> bool,
{
    for n in 1..=max_rounds {
        if !round(buf) {
            debug!(pass, rounds = n, "fixed point reached");
            return Ok(n);
        }
    }
    warn!(pass, max_rounds, "iteration ceiling reached while buffer still changing");
    Err(ConversionError::DidNotConverge {
        pass,
        rounds: max_rounds,
    })
}
