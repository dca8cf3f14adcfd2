//! Lightweight markup formatter for model output.
//!
//! Text is parsed in fixed stages (fenced code, bold, italic, inline code)
//! into a small span tree, then split into classified display lines. The same
//! segments feed the terminal renderer and the HTML markup in [`html`].

mod html;
mod inline;
mod lang;
mod lines;

pub use html::{escape_html, segments_to_html};
pub use lang::language_label;
pub use lines::SECTION_ICONS;

/// Inline run of line content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(Vec<Span>),
    Italic(Vec<Span>),
    InlineCode(String),
}

/// Leading marker of a list line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulletMarker {
    /// `-`, `*`, or `•` bullets, drawn with a `▸` glyph.
    Arrow,
    /// Numbered item, number kept as written (`"3."`).
    Number(String),
}

/// One display unit of formatted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedSegment {
    /// Fenced code. `language` is the display label, `body` the raw source
    /// with trailing whitespace removed.
    CodeBlock { language: String, body: String },
    SectionHeader { spans: Vec<Span> },
    BulletLine { marker: BulletMarker, spans: Vec<Span> },
    PlainLine { spans: Vec<Span> },
}

/// Parse `text` into display segments.
pub fn segments(text: &str) -> Vec<FormattedSegment> {
    lines::split_lines(inline::parse(text))
}

/// Render `text` as HTML markup.
pub fn format(text: &str) -> String {
    segments_to_html(&segments(text))
}

/// Visible text of `spans` with all markup removed.
pub fn plain_text(spans: &[Span]) -> String {
    let mut out = String::new();
    push_plain(spans, &mut out);
    out
}

fn push_plain(spans: &[Span], out: &mut String) {
    for span in spans {
        match span {
            Span::Text(text) | Span::InlineCode(text) => out.push_str(text),
            Span::Bold(children) | Span::Italic(children) => push_plain(children, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_blocks(segs: &[FormattedSegment]) -> Vec<(&str, &str)> {
        segs.iter()
            .filter_map(|s| match s {
                FormattedSegment::CodeBlock { language, body } => {
                    Some((language.as_str(), body.as_str()))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn balanced_fences_yield_one_block_each() {
        let text = "```py\nprint(1)\n```\nthen\n```rust\nlet x = 1;\n```\n```\nraw\n```";
        let segs = segments(text);
        assert_eq!(
            code_blocks(&segs),
            vec![("PYTHON", "print(1)"), ("RUST", "let x = 1;"), ("CODE", "raw")]
        );
    }

    #[test]
    fn code_body_is_escaped_in_markup() {
        let html = format("```rust\nif a < b && c > d {}\n```");
        assert!(html.contains("if a &lt; b &amp;&amp; c &gt; d {}"), "{html}");
        assert!(!html.contains("a < b"));
    }

    #[test]
    fn bold_outside_code_is_emphasized() {
        let html = format("this is **important** stuff");
        assert_eq!(html, "this is <strong>important</strong> stuff");
        assert!(!html.contains("**"));
    }

    #[test]
    fn asterisks_inside_code_are_kept() {
        let html = format("```py\nx = a ** b\n```");
        assert!(html.contains("x = a ** b"), "{html}");
        assert!(!html.contains("<strong>"));

        let inline = format("use `*ptr` here");
        assert!(inline.contains(r#"<span class="icod">*ptr</span>"#), "{inline}");
    }

    #[test]
    fn accumulated_tokens_format_with_emphasis() {
        let buffer: String = ["Hel", "lo ", "**world**"].concat();
        assert_eq!(buffer, "Hello **world**");
        assert_eq!(format(&buffer), "Hello <strong>world</strong>");
    }

    #[test]
    fn unterminated_fence_is_plain_escaped_text() {
        let segs = segments("```py\nprint(1)");
        assert!(code_blocks(&segs).is_empty());
        assert_eq!(format("```py\nprint(1)"), "```py<br>print(1)");
        assert_eq!(format("```html\n<b>"), "```html<br>&lt;b&gt;");
    }

    #[test]
    fn plain_text_flattens_markup() {
        let spans = vec![
            Span::Text("a ".into()),
            Span::Bold(vec![Span::Italic(vec![Span::Text("b".into())])]),
            Span::InlineCode(" c".into()),
        ];
        assert_eq!(plain_text(&spans), "a b c");
    }

    #[cfg(feature = "fuzz-tests")]
    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn balanced_fences_are_always_extracted(
                bodies in proptest::collection::vec(
                    proptest::string::string_regex("[a-z0-9 =*_<>&\n]{0,40}").expect("regex"),
                    1..5
                ),
                filler in proptest::string::string_regex("[a-zA-Z .,\n]{0,30}").expect("regex")
            ) {
                let mut text = String::new();
                for body in &bodies {
                    text.push_str(&filler);
                    text.push_str("```txt\n");
                    text.push_str(body);
                    text.push_str("```");
                }
                let segs = segments(&text);
                let blocks = code_blocks(&segs);
                prop_assert_eq!(blocks.len(), bodies.len());
                for ((label, body), expected) in blocks.iter().zip(&bodies) {
                    prop_assert_eq!(*label, "TEXT");
                    prop_assert_eq!(*body, expected.trim_end());
                }
            }

            #[test]
            fn markup_never_leaks_raw_angle_brackets(
                text in proptest::string::string_regex("[a-z<>&*`\n -]{0,80}").expect("regex")
            ) {
                prop_assume!(!text.contains("```"));
                let html = format(&text);
                let stripped = html
                    .replace("<br>", "")
                    .replace("<strong>", "")
                    .replace("</strong>", "")
                    .replace("<em>", "")
                    .replace("</em>", "")
                    .replace(r#"<span class="icod">"#, "")
                    .replace(r#"<div class="blt">"#, "")
                    .replace("</span>", "")
                    .replace("</div>", "");
                prop_assert!(!stripped.contains('<'), "{}", html);
                prop_assert!(!stripped.contains('>'), "{}", html);
            }

            #[test]
            fn formatting_never_panics(text in "\\PC{0,200}") {
                let _ = format(&text);
            }
        }
    }
}
