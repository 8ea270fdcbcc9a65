// src/error.rs

use thiserror::Error;

/// Failures surfaced by [`crate::Converter`].
///
/// Unrecognized or malformed markup is never an error: it is either passed
/// through or dropped by the residual tag stripper. The only failure is a
/// fixed-point loop that is still changing the buffer when it hits its
/// iteration ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("{pass} loop did not converge within {rounds} rounds")]
    DidNotConverge { pass: &'static str, rounds: usize },
}
