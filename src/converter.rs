// src/converter.rs

use tracing::{debug_span, warn};

use crate::error::ConversionError;
use crate::{cleanup, convergence, linear, normalize};

/// Longest input, in bytes, that [`DEFAULT_MAX_ROUNDS`] is sized for.
///
/// Longer input is still converted, but deeply nested markup beyond this length may
/// hit the ceiling.
pub const MAX_SUPPORTED_LEN: usize = 16 * 1024;

/// Default iteration ceiling for each fixed-point loop.
///
/// A round that changes the buffer consumes at least 7 bytes of input markup: the
/// cheapest one removes a single `color:;` declaration from a style attribute (nested
/// `<b></b>` around a quote costs the same in the reorder loop). One round per 4 bytes
/// covers every input up to [`MAX_SUPPORTED_LEN`].
pub const DEFAULT_MAX_ROUNDS: usize = MAX_SUPPORTED_LEN / 4;

/// HTML → BBCode converter.
///
/// Stateless apart from its iteration ceiling: a single value can be shared
/// across threads and reused for any number of conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converter {
    max_rounds: usize,
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl Converter {
    /// A ceiling of 0 is raised to 1: every loop needs one round to see a fixed point.
    pub fn with_max_rounds(max_rounds: usize) -> Self {
        Self {
            max_rounds: max_rounds.max(1),
        }
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// Converts editor HTML into BBCode.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::DidNotConverge`] if one of the fixed-point loops
    /// is still changing the buffer after `max_rounds` rounds.
    pub fn convert(&self, html: &str) -> Result<String, ConversionError> {
        let _span = debug_span!("convert", len = html.len()).entered();
        if html.len() > MAX_SUPPORTED_LEN && self.max_rounds <= DEFAULT_MAX_ROUNDS {
            warn!(
                len = html.len(),
                max = MAX_SUPPORTED_LEN,
                "input longer than the supported length; deep nesting may not converge"
            );
        }

        let mut buf = html.to_owned();
        linear::rewrite(&mut buf);
        convergence::run(&mut buf, self.max_rounds)?;
        cleanup::finish(&mut buf);
        normalize::run(&mut buf, self.max_rounds)?;
        Ok(buf)
    }
}

/// Converts `html` with the default iteration ceiling.
///
/// # Errors
///
/// See [`Converter::convert`].
pub fn html_to_bbcode(html: &str) -> Result<String, ConversionError> {
    Converter::default().convert(html)
}
