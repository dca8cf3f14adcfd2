//! Syntax highlighting for fenced code blocks.
//!
//! Code blocks carry a display label (`PYTHON`, `C++`, ...) rather than a
//! file path, so the label is mapped back to a syntect token first.

use std::sync::OnceLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Run of text drawn with one foreground color and set of attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledToken {
    pub text: String,
    pub rgb: (u8, u8, u8),
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl StyledToken {
    pub fn new(text: impl Into<String>, rgb: (u8, u8, u8)) -> Self {
        Self {
            text: text.into(),
            rgb,
            bold: false,
            italic: false,
            underline: false,
        }
    }

    fn from_syntect(style: Style, text: &str) -> Self {
        let fg = style.foreground;
        let has = |flag| style.font_style.contains(flag);
        Self {
            text: text.to_string(),
            rgb: (fg.r, fg.g, fg.b),
            bold: has(FontStyle::BOLD),
            italic: has(FontStyle::ITALIC),
            underline: has(FontStyle::UNDERLINE),
        }
    }
}

fn syntaxes() -> &'static SyntaxSet {
    static SYNTAXES: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAXES.get_or_init(SyntaxSet::load_defaults_newlines)
}

/// Dark theme used for every block; any bundled theme if both names vanish.
fn code_theme() -> Option<&'static Theme> {
    static THEMES: OnceLock<ThemeSet> = OnceLock::new();
    let themes = THEMES.get_or_init(ThemeSet::load_defaults);
    ["base16-eighties.dark", "base16-ocean.dark"]
        .iter()
        .find_map(|name| themes.themes.get(*name))
        .or_else(|| themes.themes.values().next())
}

/// Syntect lookup token for a code block label.
fn syntax_token(label: &str) -> Option<String> {
    let token = match label {
        "" | "CODE" | "TEXT" => return None,
        "GOLANG" => "go",
        "C++" => "cpp",
        "C#" => "cs",
        "BASH" | "SHELL" => "sh",
        other => return Some(other.to_ascii_lowercase()),
    };
    Some(token.to_string())
}

fn find_syntax(label: &str) -> Option<&'static SyntaxReference> {
    let syntax = syntaxes().find_syntax_by_token(&syntax_token(label)?)?;
    (syntax.name != "Plain Text").then_some(syntax)
}

/// Highlight code lines for a block labelled `label`.
///
/// Returns `None` when the label names no known syntax or highlighting fails;
/// callers then draw the lines plain.
pub fn highlight_code(label: &str, lines: &[&str]) -> Option<Vec<Vec<StyledToken>>> {
    if lines.is_empty() {
        return Some(Vec::new());
    }

    let mut highlighter = HighlightLines::new(find_syntax(label)?, code_theme()?);
    lines
        .iter()
        .map(|line| {
            let ranges = highlighter.highlight_line(line, syntaxes()).ok()?;
            Some(
                ranges
                    .into_iter()
                    .filter(|(_, fragment)| !fragment.is_empty())
                    .map(|(style, fragment)| StyledToken::from_syntect(style, fragment))
                    .collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlights_known_labels() {
        let highlighted =
            highlight_code("RUST", &["fn main() {", "    let x = 1;", "}"]).expect("rust syntax");
        assert_eq!(highlighted.len(), 3);
        let first: String = highlighted[0].iter().map(|t| t.text.as_str()).collect();
        assert_eq!(first, "fn main() {");
    }

    #[test]
    fn label_aliases_resolve() {
        assert!(highlight_code("PYTHON", &["print(1)"]).is_some());
        assert!(highlight_code("C++", &["int x;"]).is_some());
        assert!(highlight_code("BASH", &["echo hi"]).is_some());
        assert!(highlight_code("GOLANG", &["package main"]).is_some());
    }

    #[test]
    fn generic_and_unknown_labels_stay_plain() {
        assert!(highlight_code("CODE", &["x"]).is_none());
        assert!(highlight_code("TEXT", &["x"]).is_none());
        assert!(highlight_code("NOT-A-LANGUAGE", &["x"]).is_none());
    }
}
