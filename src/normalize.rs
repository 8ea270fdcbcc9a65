// src/normalize.rs
//
// Tag-order normalizer, two fixed-point loops over bracket markup:
//   reorder     [b][quote]x[/quote][/b]  →  [quote][b]x[/b][/quote]
//               (same for i, u, color and for code blocks): quote and code are
//               always the outer pair when they directly nest with inline styling.
//   empty-pairs [b][/b], [quote7][/quote], [url=..][/url], ... → ""
//
// Content between the pairs may span lines.

use std::sync::LazyLock;

use crate::error::ConversionError;
use crate::rule::{apply_all, converge, Rule};

const EMPHASIS: [&str; 3] = ["b", "i", "u"];

static REORDER: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let mut rules = Vec::new();
    // The tag is captured so the open tag keeps its case in both positions.
    for t in EMPHASIS {
        rules.push(Rule::new(
            "emphasis-quote",
            &format!(r"\[({t})\]\[quote([^\]]*)\]([\s\S]*?)\[/quote\]\[/{t}\]"),
            "[quote${2}][${1}]${3}[/${1}][/quote]",
        ));
    }
    rules.push(Rule::new(
        "color-quote",
        r"\[color=([^\]]*)\]\[quote([^\]]*)\]([\s\S]*?)\[/quote\]\[/color\]",
        "[quote${2}][color=${1}]${3}[/color][/quote]",
    ));
    for t in EMPHASIS {
        rules.push(Rule::new(
            "emphasis-code",
            &format!(r"\[({t})\]\[code\]([\s\S]*?)\[/code\]\[/{t}\]"),
            "[code][${1}]${2}[/${1}][/code]",
        ));
    }
    rules.push(Rule::new(
        "color-code",
        r"\[color=([^\]]*)\]\[code\]([\s\S]*?)\[/code\]\[/color\]",
        "[code][color=${1}]${2}[/color][/code]",
    ));
    rules
});

static EMPTY_PAIRS: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new("empty-b", r"\[b\]\[/b\]", ""),
        Rule::new("empty-i", r"\[i\]\[/i\]", ""),
        Rule::new("empty-u", r"\[u\]\[/u\]", ""),
        Rule::new("empty-quote", r"\[quote[^\]]*\]\[/quote\]", ""),
        Rule::new("empty-code", r"\[code\]\[/code\]", ""),
        Rule::new("empty-url", r"\[url=[^\]]+\]\[/url\]", ""),
        Rule::new("empty-img", r"\[img\]\[/img\]", ""),
        Rule::new("empty-color", r"\[color=[^\]]*\]\[/color\]", ""),
    ]
});

/// Runs the reorder loop, then the empty-pair loop. Returns the round counts of both.
pub fn run(buf: &mut String, max_rounds: usize) -> Result<(usize, usize), ConversionError> {
    let reorder = converge("reorder", max_rounds, buf, |b| apply_all(&REORDER, b))?;
    let empty = converge("empty-pairs", max_rounds, buf, |b| apply_all(&EMPTY_PAIRS, b))?;
    Ok((reorder, empty))
}
