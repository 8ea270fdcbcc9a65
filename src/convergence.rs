// src/convergence.rs
//
// Convergence pass: one round is applied repeatedly until it leaves the buffer alone.
//
// Round layout (order matters):
//   1. <font color=..> → [color=..]; only if that changed nothing, strip plain <font>.
//      Colored fonts must be converted before the fallback strips them.
//   2. <a href=..> → [url=..].
//   3. Style-attribute rules on span/blockquote/pre, rule-major: bold, italic,
//      underline (on and off), then color. A container may carry several properties;
//      each round consumes the leading one and keeps the container for the next round.
//      Then canonical class/id form for blockquote/pre and unwrap of style-less spans.
//   4. Only if step 3 changed nothing: strip remaining spans, then try <pre class=code>,
//      then the member-quote variants (trailing id, leading id, no id), stopping at the
//      first one that fires. Quote/code detection waits for wrappers to be reduced.
//
// Content patterns never cross a '<', so nesting is resolved innermost-first, one layer
// per round.

use std::sync::LazyLock;

use crate::error::ConversionError;
use crate::rule::{apply_all, converge, Rule};

/* ================================ Rules ================================== */

/// Containers the style-attribute rules recognise.
const STYLED_CONTAINERS: [&str; 3] = ["span", "blockquote", "pre"];

/// Block containers whose class/id attributes get normalized.
const BLOCK_CONTAINERS: [&str; 2] = ["blockquote", "pre"];

/// (name, css property/value, bracket tag). `None` strips the container's style
/// without adding a bracket pair.
const STYLE_TOGGLES: [(&str, &str, Option<&str>); 6] = [
    ("bold", "font-weight: ?bold", Some("b")),
    ("bold-off", "font-weight: ?normal", None),
    ("italic", "font-style: ?italic", Some("i")),
    ("italic-off", "font-style: ?normal", None),
    ("underline", "text-decoration: ?underline", Some("u")),
    ("underline-off", "text-decoration: ?none", None),
];

static FONT_COLOR: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        "font-color",
        r#"<font\s[^<>]*?color="?([^<>]*?)"?(\s[^<>]*)?>([^<>]*?)</font>"#,
        "[color=${1}]${3}[/color]",
    )
});

static FONT_STRIP: LazyLock<Rule> =
    LazyLock::new(|| Rule::new("font-strip", r"<font[^<>]*>([^<>]*?)</font>", "${1}"));

static LINK: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        "link",
        r#"<a\s[^<>]*?href="?([^<>]*?)"?(\s[^<>]*)?>([^<>]*?)</a>"#,
        "[url=${1}]${3}[/url]",
    )
});

static STYLE_RULES: LazyLock<Vec<Rule>> = LazyLock::new(build_style_rules);

static SPAN_STRIP: LazyLock<Rule> =
    LazyLock::new(|| Rule::new("span-strip", r"<span[^<>]*>([^<>]*?)</span>", "${1}"));

static CODE: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        "code",
        r#"<pre\s[^<>]*?class="?code"?[^<>]*?>([^<>]*?)</pre>"#,
        "[code]${1}[/code]",
    )
});

static QUOTES: LazyLock<[Rule; 3]> = LazyLock::new(|| {
    [
        Rule::new(
            "quote-trailing-id",
            r#"<blockquote\s[^<>]*?class="?memberquote"?[^<>]*?id="?([^<>"]*)"?>([^<>]*?)</blockquote>"#,
            "[quote${1}]${2}[/quote]",
        ),
        Rule::new(
            "quote-leading-id",
            r#"<blockquote\s[^<>]*?id="?([^<>"]*?)"? class="?memberquote"?[^<>]*?>([^<>]*?)</blockquote>"#,
            "[quote${1}]${2}[/quote]",
        ),
        Rule::new(
            "quote",
            r#"<blockquote\s[^<>]*?class="?memberquote"?[^<>]*?>([^<>]*?)</blockquote>"#,
            "[quote]${1}[/quote]",
        ),
    ]
});

fn build_style_rules() -> Vec<Rule> {
    let mut rules = Vec::new();

    // The container keeps a truncated `style=` so the next round sees what is left.
    for (name, property, tag) in STYLE_TOGGLES {
        for c in STYLED_CONTAINERS {
            let pattern = format!(r#"<{c}\s[^<>]*?style="?{property};?"?\s*([^<]*?)</{c}>"#);
            // Lowercased on purpose: the kept container only feeds later rounds and the
            // residual strip, neither of which looks at its case.
            let kept = format!("<{c} style=${{1}}</{c}>");
            let replacement = match tag {
                Some(t) => format!("[{t}]{kept}[/{t}]"),
                None => kept,
            };
            rules.push(Rule::new(name, &pattern, replacement));
        }
    }

    for c in STYLED_CONTAINERS {
        rules.push(Rule::new(
            "style-color",
            &format!(r#"<{c}\s[^<>]*?style="?color: ?([^<>]*?);"?\s*([^<]*?)</{c}>"#),
            format!("[color=${{1}}]<{c} style=${{2}}</{c}>[/color]"),
        ));
    }

    for c in BLOCK_CONTAINERS {
        rules.push(Rule::new(
            "block-attrs",
            &format!(r#"<{c}\s[^<>]*?style="?"? (class=|id=)([^<>]*)>([^<>]*?)</{c}>"#),
            format!("<{c} ${{1}}${{2}}>${{3}}</{c}>"),
        ));
    }

    rules.push(Rule::new(
        "span-unstyled",
        r#"<span\s[^<>]*?style="?"?>([^<>]*?)</span>"#,
        "${1}",
    ));

    rules
}

/* ================================ Round ================================== */

/// One application of the round described at the top of this file.
fn round(buf: &mut String) -> bool {
    let mut changed = false;

    if FONT_COLOR.apply(buf) {
        changed = true;
    } else {
        changed |= FONT_STRIP.apply(buf);
    }

    changed |= LINK.apply(buf);

    if apply_all(&STYLE_RULES, buf) {
        return true;
    }

    changed |= SPAN_STRIP.apply(buf);

    if CODE.apply(buf) {
        return true;
    }
    for quote in QUOTES.iter() {
        if quote.apply(buf) {
            return true;
        }
    }

    changed
}

/// Runs the convergence pass to a fixed point. Returns the number of rounds.
pub fn run(buf: &mut String, max_rounds: usize) -> Result<usize, ConversionError> {
    converge("convergence", max_rounds, buf, round)
}
