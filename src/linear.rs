// src/linear.rs
//
// Linear rewrite pass: every rule runs exactly once, in table order.
//
// - Closing emphasis tags are rewritten before opening ones so that `<b ...>` with
//   attributes cannot swallow a following `</b>`.
// - Raw CR/LF is dropped before `<br>` and `</p>` are turned into newlines; line breaks
//   in the output come from markup only.
// - `<div>` becomes a newline plus a `<span>` carrying the same attributes, so style
//   attributes on divs are handled by the span rules of the convergence pass.
// - `&amp;` is decoded last so `&amp;quot;` stays `&quot;`.

use std::sync::LazyLock;

use crate::rule::{apply_all, Rule};

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            "img",
            r#"<img\s[^<>]*?src="?([^<>]*?)"?(\s[^<>]*)?/?>"#,
            "[img]${1}[/img]",
        ),
        Rule::new("b-close", r"</(strong|b)>", "[/b]"),
        Rule::new("b-open", r"<(strong|b)(\s[^<>]*)?>", "[b]"),
        Rule::new("i-close", r"</(em|i)>", "[/i]"),
        Rule::new("i-open", r"<(em|i)(\s[^<>]*)?>", "[i]"),
        Rule::new("u-close", r"</u>", "[/u]"),
        Rule::new("lf", r"\n", ""),
        Rule::new("cr", r"\r", ""),
        Rule::new("u-open", r"<u(\s[^<>]*)?>", "[u]"),
        Rule::new("br", r"<br(\s[^<>]*)?/?>", "\n"),
        Rule::new("p-open", r"<p(\s[^<>]*)?>", ""),
        Rule::new("p-close", r"</p>", "\n"),
        Rule::new("ul-open", r"<ul>", "[ul]"),
        Rule::new("ul-close", r"</ul>", "[/ul]"),
        Rule::new("li-open", r"<li>", "[li]"),
        Rule::new("li-close", r"</li>", "[/li]"),
        Rule::new("div-open", r"<div([^<>]*)>", "\n<span${1}>"),
        Rule::new("div-close", r"</div>", "</span>\n"),
        Rule::new("nbsp", r"&nbsp;", " "),
        Rule::new("quot", r"&quot;", "\""),
        Rule::new("amp", r"&amp;", "&"),
    ]
});

/// Applies the linear rule table to `buf` once. Returns `true` if anything changed.
pub fn rewrite(buf: &mut String) -> bool {
    apply_all(&RULES, buf)
}
