//! Line splitting and classification.

use std::sync::OnceLock;

use regex::Regex;

use super::inline::{merge_text, Node};
use super::{plain_text, BulletMarker, FormattedSegment, Span};

/// Leading glyphs that mark a section header line.
pub const SECTION_ICONS: [&str; 12] = [
    "🔍", "💡", "⚙️", "✅", "🚀", "📌", "⚠️", "🔧", "📊", "🐛", "🔬", "🧪",
];

fn bullet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[•\-\*]\s").expect("bullet regex"))
}

fn numbered_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+\.)\s").expect("numbered regex"))
}

/// Break parsed nodes into display lines.
///
/// A code block occupies its own segment. Text sharing a source line with a
/// block is emitted around it, and the block's line does not add an empty
/// segment of its own.
pub(super) fn split_lines(nodes: Vec<Node>) -> Vec<FormattedSegment> {
    let mut segments = Vec::new();
    let mut current: Vec<Span> = Vec::new();
    let mut line_has_block = false;

    for node in nodes {
        match node {
            Node::Block { language, body } => {
                if !current.is_empty() {
                    segments.push(classify(std::mem::take(&mut current)));
                }
                segments.push(FormattedSegment::CodeBlock { language, body });
                line_has_block = true;
            }
            Node::Span(Span::Text(text)) => {
                let mut parts = text.split('\n');
                if let Some(first) = parts.next() {
                    push_text(&mut current, first);
                }
                for part in parts {
                    if !current.is_empty() || !line_has_block {
                        segments.push(classify(std::mem::take(&mut current)));
                    }
                    line_has_block = false;
                    push_text(&mut current, part);
                }
            }
            Node::Span(span) => current.push(span),
        }
    }
    if !current.is_empty() || !line_has_block {
        segments.push(classify(current));
    }
    segments
}

fn push_text(current: &mut Vec<Span>, text: &str) {
    if !text.is_empty() {
        current.push(Span::Text(text.to_string()));
    }
}

/// Header, bullet, numbered item, or plain line. Only plain lines keep their
/// surrounding whitespace.
fn classify(spans: Vec<Span>) -> FormattedSegment {
    let spans = merge_text(spans);
    let visible = plain_text(&spans);
    let visible = visible.trim();

    if SECTION_ICONS.iter().any(|icon| visible.starts_with(icon)) {
        return FormattedSegment::SectionHeader {
            spans: trim_spans(spans),
        };
    }

    let trimmed = trim_spans(spans.clone());
    if let Some(Span::Text(lead)) = trimmed.first() {
        if bullet_re().is_match(lead) && !lead.starts_with("**") {
            let rest: String = lead.chars().skip(2).collect();
            return FormattedSegment::BulletLine {
                marker: BulletMarker::Arrow,
                spans: replace_lead(trimmed, rest),
            };
        }
        if let Some(caps) = numbered_re().captures(lead) {
            let number = caps.get(1).map_or("", |m| m.as_str()).to_string();
            let consumed = caps.get(0).map_or(0, |m| m.end());
            let rest = lead[consumed..].to_string();
            return FormattedSegment::BulletLine {
                marker: BulletMarker::Number(number),
                spans: replace_lead(trimmed, rest),
            };
        }
    }

    FormattedSegment::PlainLine { spans }
}

fn replace_lead(mut spans: Vec<Span>, rest: String) -> Vec<Span> {
    if rest.is_empty() {
        spans.remove(0);
    } else {
        spans[0] = Span::Text(rest);
    }
    spans
}

/// Strip whitespace from the outer text leaves of a line.
fn trim_spans(mut spans: Vec<Span>) -> Vec<Span> {
    if let Some(Span::Text(first)) = spans.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(Span::Text(last)) = spans.last_mut() {
        *last = last.trim_end().to_string();
    }
    spans.retain(|span| !matches!(span, Span::Text(t) if t.is_empty()));
    spans
}

#[cfg(test)]
mod tests {
    use super::super::segments;
    use super::*;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }

    fn plain(s: &str) -> FormattedSegment {
        FormattedSegment::PlainLine {
            spans: if s.is_empty() { vec![] } else { vec![text(s)] },
        }
    }

    #[test]
    fn headers_are_trimmed_and_keep_their_icon() {
        assert_eq!(
            segments("  🔍 Problem Breakdown  "),
            vec![FormattedSegment::SectionHeader {
                spans: vec![text("🔍 Problem Breakdown")]
            }]
        );
    }

    #[test]
    fn bold_header_counts_as_header() {
        assert_eq!(
            segments("**⚙️ Implementation**"),
            vec![FormattedSegment::SectionHeader {
                spans: vec![Span::Bold(vec![text("⚙️ Implementation")])]
            }]
        );
    }

    #[test]
    fn bullets_drop_their_marker() {
        for line in ["- item", "* item", "• item", "   - item"] {
            assert_eq!(
                segments(line),
                vec![FormattedSegment::BulletLine {
                    marker: BulletMarker::Arrow,
                    spans: vec![text("item")]
                }],
                "{line:?}"
            );
        }
    }

    #[test]
    fn bullet_with_emphasis() {
        assert_eq!(
            segments("- **key**: value"),
            vec![FormattedSegment::BulletLine {
                marker: BulletMarker::Arrow,
                spans: vec![Span::Bold(vec![text("key")]), text(": value")]
            }]
        );
    }

    #[test]
    fn dash_without_space_is_plain() {
        assert_eq!(segments("-flag"), vec![plain("-flag")]);
        assert_eq!(segments("--verbose"), vec![plain("--verbose")]);
    }

    #[test]
    fn numbered_items_keep_their_number() {
        assert_eq!(
            segments("12. Twelfth"),
            vec![FormattedSegment::BulletLine {
                marker: BulletMarker::Number("12.".into()),
                spans: vec![text("Twelfth")]
            }]
        );
        assert_eq!(segments("3.14 is pi"), vec![plain("3.14 is pi")]);
    }

    #[test]
    fn plain_lines_keep_indentation() {
        assert_eq!(segments("    indented"), vec![plain("    indented")]);
    }

    #[test]
    fn blank_lines_are_preserved() {
        assert_eq!(segments("a\n\nb"), vec![plain("a"), plain(""), plain("b")]);
        assert_eq!(segments("a\n"), vec![plain("a"), plain("")]);
    }

    #[test]
    fn block_on_its_own_line_adds_no_blank_segments() {
        let segs = segments("Here:\n```rust\nfn main() {}\n```\nDone");
        assert_eq!(
            segs,
            vec![
                plain("Here:"),
                FormattedSegment::CodeBlock {
                    language: "RUST".into(),
                    body: "fn main() {}".into()
                },
                plain("Done"),
            ]
        );
    }

    #[test]
    fn text_around_block_on_same_line() {
        let segs = segments("see ```x``` here");
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0], plain("see "));
        assert!(matches!(segs[1], FormattedSegment::CodeBlock { .. }));
        assert_eq!(segs[2], plain(" here"));
    }
}
