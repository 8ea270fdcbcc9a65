// src/cleanup.rs
//
// Catch-all after the convergence pass:
// - Every remaining `<...>` tag is deleted. A tag is a '<' followed by anything but
//   '<' or '>' up to the next '>'. A '<' that meets another '<' first is literal text.
// - `&lt;` / `&gt;` are decoded afterwards, so escaped brackets from the editor survive
//   as text and are never mistaken for tags.

use std::sync::LazyLock;

use memchr::{memchr, memchr2};

use crate::rule::{apply_all, Rule};

static ESCAPES: LazyLock<[Rule; 2]> = LazyLock::new(|| {
    [
        Rule::new("lt", r"&lt;", "<"),
        Rule::new("gt", r"&gt;", ">"),
    ]
});

/// Returns `src` with every residual tag removed.
pub fn strip_residual_tags(src: &str) -> String {
    let s = src.as_bytes();
    let n = s.len();
    let mut out = String::with_capacity(n);
    let mut i = 0usize;

    while i < n {
        let Some(lt) = memchr(b'<', &s[i..]).map(|off| i + off) else {
            out.push_str(&src[i..]);
            break;
        };
        out.push_str(&src[i..lt]);

        match memchr2(b'<', b'>', &s[lt + 1..]).map(|off| lt + 1 + off) {
            Some(j) if s[j] == b'>' => i = j + 1,
            Some(j) => {
                // Unmatched '<': keep it and restart at the next one.
                out.push_str(&src[lt..j]);
                i = j;
            }
            None => {
                out.push_str(&src[lt..]);
                break;
            }
        }
    }
    out
}

/// Strips residual tags, then decodes the escaped angle brackets.
pub fn finish(buf: &mut String) {
    *buf = strip_residual_tags(buf);
    apply_all(ESCAPES.as_slice(), buf);
}
