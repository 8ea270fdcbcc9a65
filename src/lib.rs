// src/lib.rs
//
//! html2bb — converts the HTML produced by a rich-text editing surface into BBCode.
//!
//! The conversion is a text-rewrite cascade rather than an HTML parser. Three passes
//! run over a single `String`:
//!
//! 1. a linear pass of one-shot rules (images, b/i/u, breaks, paragraphs, lists,
//!    `div` → `span`, common entities),
//! 2. a convergence pass repeated until a full round changes nothing (font colours,
//!    links, inline `style` attributes, span unwrapping, code blocks, member quotes),
//! 3. after residual tags are stripped, a normalizer that moves inline styling inside
//!    `[quote]`/`[code]` and removes empty pairs.
//!
//! Every loop is bounded; see [`Converter::with_max_rounds`]. With the default ceiling,
//! any input up to [`MAX_SUPPORTED_LEN`] bytes built from the supported markup
//! converges, whatever its nesting.
//!
//! ```
//! let bb = html2bb::html_to_bbcode(r#"<a href="http://x"><b>hi</b></a>"#).unwrap();
//! assert_eq!(bb, "[url=http://x][b]hi[/b][/url]");
//! ```
//!
//! Same-type nesting (bold inside bold) is converted best-effort and may yield
//! mismatched pairs. Markup is not sanitized.

mod cleanup;
mod convergence;
mod converter;
mod error;
mod linear;
mod normalize;
mod rule;

pub use converter::{html_to_bbcode, Converter, DEFAULT_MAX_ROUNDS, MAX_SUPPORTED_LEN};
pub use error::ConversionError;
