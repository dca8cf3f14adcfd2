//! Inline markup stages.
//!
//! Each stage rewrites the `Text` leaves produced by the previous one, so a
//! construct recognised early (a fenced block, a bold run) is opaque to the
//! stages that follow. Order: fences, bold, italic, inline code.

use std::sync::OnceLock;

use regex::Regex;

use super::lang::language_label;
use super::Span;

/// Top-level node after fence extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Node {
    Span(Span),
    Block { language: String, body: String },
}

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(\w*)\n?(.*?)```").expect("fence regex"))
}

fn bold_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold regex"))
}

fn inline_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`([^`\n]+)`").expect("inline code regex"))
}

/// Run every stage in order over `text`.
pub(super) fn parse(text: &str) -> Vec<Node> {
    apply_span_stages(extract_fences(text))
}

/// Bold, italic, and inline code over each run of spans between blocks.
fn apply_span_stages(nodes: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut run: Vec<Span> = Vec::new();
    for node in nodes {
        match node {
            Node::Span(span) => run.push(span),
            block @ Node::Block { .. } => {
                flush_run(&mut run, &mut out);
                out.push(block);
            }
        }
    }
    flush_run(&mut run, &mut out);
    out
}

fn flush_run(run: &mut Vec<Span>, out: &mut Vec<Node>) {
    if run.is_empty() {
        return;
    }
    let spans = std::mem::take(run);
    let spans = map_text(spans, &split_bold);
    let spans = apply_italic(spans);
    let spans = map_text(spans, &split_inline_code);
    out.extend(spans.into_iter().map(Node::Span));
}

// ---------------------------------------------------------------------------
// Stage 1: fenced code
// ---------------------------------------------------------------------------

/// Split `text` into literal text and fenced code blocks. An unterminated
/// fence does not match and stays in the surrounding text.
pub(super) fn extract_fences(text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut last = 0;
    for caps in fence_re().captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            nodes.push(Node::Span(Span::Text(text[last..whole.start()].to_string())));
        }
        let raw_lang = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str());
        nodes.push(Node::Block {
            language: language_label(raw_lang),
            body: body.trim_end().to_string(),
        });
        last = whole.end();
    }
    if last < text.len() || nodes.is_empty() {
        nodes.push(Node::Span(Span::Text(text[last..].to_string())));
    }
    nodes
}

// ---------------------------------------------------------------------------
// Text-leaf stages
// ---------------------------------------------------------------------------

/// Replace every `Text` leaf (recursing into emphasis) with `f(text)`.
fn map_text(spans: Vec<Span>, f: &dyn Fn(&str) -> Vec<Span>) -> Vec<Span> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        match span {
            Span::Text(text) => out.extend(f(&text)),
            Span::Bold(children) => out.push(Span::Bold(map_text(children, f))),
            Span::Italic(children) => out.push(Span::Italic(map_text(children, f))),
            code @ Span::InlineCode(_) => out.push(code),
        }
    }
    out
}

fn split_with(text: &str, re: &Regex, wrap: impl Fn(&str) -> Span) -> Vec<Span> {
    let mut out = Vec::new();
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            out.push(Span::Text(text[last..whole.start()].to_string()));
        }
        out.push(wrap(inner.as_str()));
        last = whole.end();
    }
    if last < text.len() {
        out.push(Span::Text(text[last..].to_string()));
    }
    out
}

fn split_bold(text: &str) -> Vec<Span> {
    split_with(text, bold_re(), |inner| Span::Bold(vec![Span::Text(inner.to_string())]))
}

fn split_inline_code(text: &str) -> Vec<Span> {
    split_with(text, inline_code_re(), |inner| Span::InlineCode(inner.to_string()))
}

// ---------------------------------------------------------------------------
// Stage 3: italic
// ---------------------------------------------------------------------------

/// A character of a text leaf, or an already-recognised span treated as one
/// opaque non-asterisk unit.
#[derive(Debug, Clone)]
enum Atom {
    Char(char),
    Node(Span),
}

/// `*text*` where neither delimiter touches another `*`. Matches may wrap
/// earlier spans (a bold run inside italics) but never cross a newline.
fn apply_italic(spans: Vec<Span>) -> Vec<Span> {
    let atoms: Vec<Atom> = spans
        .into_iter()
        .flat_map(|span| match span {
            Span::Text(text) => text.chars().map(Atom::Char).collect::<Vec<_>>(),
            Span::Bold(children) => vec![Atom::Node(Span::Bold(apply_italic(children)))],
            other => vec![Atom::Node(other)],
        })
        .collect();

    let mut out = Vec::new();
    let mut i = 0;
    while i < atoms.len() {
        if let Some(close) = italic_close(&atoms, i) {
            out.push(Span::Italic(atoms_to_spans(&atoms[i + 1..close])));
            i = close + 1;
        } else {
            out.extend(atoms_to_spans(&atoms[i..=i]));
            i += 1;
        }
    }
    merge_text(out)
}

fn is_star(atoms: &[Atom], idx: usize) -> bool {
    matches!(atoms.get(idx), Some(Atom::Char('*')))
}

fn italic_close(atoms: &[Atom], open: usize) -> Option<usize> {
    if !is_star(atoms, open) || is_star(atoms, open + 1) {
        return None;
    }
    if open > 0 && is_star(atoms, open - 1) {
        return None;
    }
    for close in open + 2..atoms.len() {
        if matches!(atoms[close - 1], Atom::Char('\n')) {
            return None;
        }
        if is_star(atoms, close) && !is_star(atoms, close - 1) && !is_star(atoms, close + 1) {
            return Some(close);
        }
    }
    None
}

fn atoms_to_spans(atoms: &[Atom]) -> Vec<Span> {
    let mut out = Vec::new();
    let mut text = String::new();
    for atom in atoms {
        match atom {
            Atom::Char(c) => text.push(*c),
            Atom::Node(span) => {
                if !text.is_empty() {
                    out.push(Span::Text(std::mem::take(&mut text)));
                }
                out.push(span.clone());
            }
        }
    }
    if !text.is_empty() {
        out.push(Span::Text(text));
    }
    out
}

/// Join adjacent `Text` spans.
pub(super) fn merge_text(spans: Vec<Span>) -> Vec<Span> {
    let mut out: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        if let (Some(Span::Text(prev)), Span::Text(next)) = (out.last_mut(), &span) {
            prev.push_str(next);
            continue;
        }
        out.push(span);
    }
    out
}
