use html2bb::{html_to_bbcode, ConversionError, Converter, DEFAULT_MAX_ROUNDS, MAX_SUPPORTED_LEN};
use pretty_assertions::assert_eq;

fn convert(html: &str) -> String {
    html_to_bbcode(html).unwrap()
}

#[test]
fn bold_closes_exactly() {
    assert_eq!(convert("<b>hi</b>"), "[b]hi[/b]");
}

#[test]
fn empty_bold_vanishes() {
    assert_eq!(convert("<b></b>"), "");
}

#[test]
fn color_style_on_span() {
    assert_eq!(
        convert(r#"<span style="color: red;">hello</span>"#),
        "[color=red]hello[/color]"
    );
}

#[test]
fn color_style_on_div() {
    assert_eq!(
        convert(r#"<div style="color: red;">hello</div>"#),
        "\n[color=red]hello[/color]\n"
    );
}

#[test]
fn quote_is_outermost() {
    assert_eq!(
        convert("[b][quote]text[/quote][/b]"),
        "[quote][b]text[/b][/quote]"
    );
    assert_eq!(
        convert(r#"<font color="red"><blockquote class="memberquote" id="5">t</blockquote></font>"#),
        "[quote5][color=red]t[/color][/quote]"
    );
}

#[test]
fn code_is_outermost() {
    assert_eq!(
        convert(r#"<i><pre class="code">x</pre></i>"#),
        "[code][i]x[/i][/code]"
    );
}

#[test]
fn link() {
    assert_eq!(
        convert(r#"<a href="http://x">label</a>"#),
        "[url=http://x]label[/url]"
    );
}

#[test]
fn image() {
    assert_eq!(
        convert(r#"<img src="http://x/y.png">"#),
        "[img]http://x/y.png[/img]"
    );
}

#[test]
fn list() {
    assert_eq!(
        convert("<ul><li>a</li><li>b</li></ul>"),
        "[ul][li]a[/li][li]b[/li][/ul]"
    );
}

#[test]
fn editor_document() {
    let html = "<p>Hello&nbsp;<b>world</b>,\n see <a href=\"http://example.com\">this</a>.</p>\
                <p><span style=\"font-style: italic;\">fancy</span><br></p>";
    assert_eq!(
        convert(html),
        "Hello [b]world[/b], see [url=http://example.com]this[/url].\n[i]fancy[/i]\n\n"
    );
}

#[test]
fn escaped_brackets_survive_as_text() {
    assert_eq!(convert("1 &lt; 2 &amp;&amp; <b>3 &gt; 2</b>"), "1 < 2 && [b]3 > 2[/b]");
}

#[test]
fn unknown_tags_dropped() {
    assert_eq!(
        convert(r#"<table><tr><td>a</td></tr></table><h1 id="t">b</h1>"#),
        "ab"
    );
}

#[test]
fn same_tag_nesting_still_produces_output() {
    // Pairs are not matched up; tags are rewritten in place.
    assert_eq!(convert("<b>a<b>b</b>c</b>"), "[b]a[b]b[/b]c[/b]");
}

#[test]
fn no_raw_tags_survive() {
    let fragments = [
        "<b>x</b>",
        "<i>y</i>",
        "<u>z</u>",
        r#"<span style="color: #00ff00;">c</span>"#,
        r#"<span style="font-weight: bold;">w</span>"#,
        r#"<font face="a" color="blue">f</font>"#,
        r#"<a href="http://h">l</a>"#,
        r#"<img src="i.png" />"#,
        r#"<blockquote class="memberquote">q</blockquote>"#,
        r#"<pre class="code">k</pre>"#,
        "<div>d</div>",
        "<p>p</p>",
        "<br>",
        "<ul><li>o</li></ul>",
    ];
    for a in fragments {
        for b in fragments {
            let html = format!("{a}{b}<span>{a}</span><div class=\"w\">{b}</div>");
            let out = convert(&html);
            assert!(
                !out.contains('<') && !out.contains('>'),
                "{html:?} produced {out:?}"
            );
        }
    }
}

#[test]
fn deep_nesting_terminates_within_ceiling() {
    let depth = 300;
    let html = format!(
        "{}{}{}",
        r#"<span style="font-weight: bold;">"#.repeat(depth),
        "x",
        "</span>".repeat(depth)
    );
    // Each styled layer needs one round; only the innermost style rule matches per round.
    let out = Converter::default().convert(&html).unwrap();
    assert!(out.starts_with("[b]"));
    assert!(out.contains('x'));
    assert!(!out.contains('<'));

    let nested_divs = format!("{}x{}", "<div>".repeat(depth), "</div>".repeat(depth));
    let out = Converter::default().convert(&nested_divs).unwrap();
    assert_eq!(out.trim(), "x");
}

/// Pads `body` with trailing spaces in the text node so the whole input is exactly
/// `MAX_SUPPORTED_LEN` bytes.
fn at_supported_len(open: &str, body: &str, close: &str) -> String {
    let used = open.len() + body.len() + close.len();
    format!("{open}{body}{}{close}", " ".repeat(MAX_SUPPORTED_LEN - used))
}

#[test]
fn cheapest_rounds_at_supported_len_converge() {
    // One `color:;` declaration per round: 7 bytes per round.
    let decls = (MAX_SUPPORTED_LEN - "<span style=>x</span>".len()) / "color:;".len();
    let html = at_supported_len(
        &format!("<span style={}", "color:;".repeat(decls)),
        ">x",
        "</span>",
    );
    assert_eq!(html.len(), MAX_SUPPORTED_LEN);

    let out = Converter::default().convert(&html).unwrap();
    assert_eq!(out.matches("[color=]").count(), decls);
    assert_eq!(out.trim_end_matches("[/color]").trim_start_matches("[color=]").trim(), "x");
}

#[test]
fn nested_spans_at_supported_len_converge() {
    let layers = (MAX_SUPPORTED_LEN - 1) / "<span></span>".len();
    let html = at_supported_len(&"<span>".repeat(layers), "x", &"</span>".repeat(layers));
    assert_eq!(html.len(), MAX_SUPPORTED_LEN);
    assert_eq!(Converter::default().convert(&html).unwrap().trim(), "x");
}

#[test]
fn nested_bold_around_quote_at_supported_len_converge() {
    let quote_open = r#"<blockquote class="memberquote">"#;
    let quote_close = "</blockquote>";
    let layers = (MAX_SUPPORTED_LEN - quote_open.len() - quote_close.len() - 1) / "<b></b>".len();
    let html = at_supported_len(
        &format!("{}{quote_open}", "<b>".repeat(layers)),
        "x",
        &format!("{quote_close}{}", "</b>".repeat(layers)),
    );
    assert_eq!(html.len(), MAX_SUPPORTED_LEN);

    let out = Converter::default().convert(&html).unwrap();
    assert!(out.starts_with("[quote][b]"));
    assert!(out.ends_with("[/b][/quote]"));
}

#[test]
fn ceiling_is_reported() {
    let html = format!("{}x{}", "<span>".repeat(10), "</span>".repeat(10));
    assert_eq!(
        Converter::with_max_rounds(5).convert(&html),
        Err(ConversionError::DidNotConverge {
            pass: "convergence",
            rounds: 5
        })
    );
    assert!(DEFAULT_MAX_ROUNDS > 10);
}
