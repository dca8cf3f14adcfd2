//! HTML markup for formatted segments.

use super::{BulletMarker, FormattedSegment, Span};

/// Escape `&`, `<` and `>`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Segments joined with `<br>`.
pub fn segments_to_html(segments: &[FormattedSegment]) -> String {
    segments
        .iter()
        .map(segment_html)
        .collect::<Vec<_>>()
        .join("<br>")
}

fn segment_html(segment: &FormattedSegment) -> String {
    match segment {
        FormattedSegment::CodeBlock { language, body } => code_window(language, body),
        FormattedSegment::SectionHeader { spans } => {
            format!(r#"<span class="shdr">{}</span>"#, spans_html(spans))
        }
        FormattedSegment::BulletLine {
            marker: BulletMarker::Arrow,
            spans,
        } => format!(r#"<div class="blt">▸ {}</div>"#, spans_html(spans)),
        FormattedSegment::BulletLine {
            marker: BulletMarker::Number(number),
            spans,
        } => format!(
            r#"<div class="blt">{} {}</div>"#,
            escape_html(number),
            spans_html(spans)
        ),
        FormattedSegment::PlainLine { spans } => spans_html(spans),
    }
}

/// Code body keeps its newlines; the window is styled `white-space: pre`.
fn code_window(language: &str, body: &str) -> String {
    format!(
        concat!(
            r#"<div class="cwin">"#,
            r#"<div class="cbar">"#,
            r#"<div class="cdots"><div class="cdot"></div><div class="cdot"></div><div class="cdot"></div></div>"#,
            r#"<span class="clang">// {}</span>"#,
            r#"<span class="ctag">CYBERBOT GENERATED</span>"#,
            r#"</div>"#,
            r#"<div class="cbody">{}</div>"#,
            r#"</div>"#
        ),
        escape_html(language),
        escape_html(body)
    )
}

fn spans_html(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Span::Text(text) => out.push_str(&escape_html(text)),
            Span::Bold(children) => {
                out.push_str("<strong>");
                out.push_str(&spans_html(children));
                out.push_str("</strong>");
            }
            Span::Italic(children) => {
                out.push_str("<em>");
                out.push_str(&spans_html(children));
                out.push_str("</em>");
            }
            Span::InlineCode(code) => {
                out.push_str(r#"<span class="icod">"#);
                out.push_str(&escape_html(code));
                out.push_str("</span>");
            }
        }
    }
    out
}
