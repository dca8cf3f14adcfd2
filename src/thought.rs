//! Separates structured "reasoning" sections from the main answer.
//!
//! A line starting with one of [`THOUGHT_MARKERS`] opens a thought section,
//! which runs up to and including the next blank line.

use crate::format::escape_html;

/// Header shown above extracted thought lines.
pub const THOUGHT_HEADER: &str = "◈ NEURAL THOUGHT PROCESS";

pub const THOUGHT_MARKERS: [&str; 17] = [
    "🔍 Problem Breakdown",
    "🔍 ANALYSIS",
    "💡 Approach",
    "💡 APPROACH",
    "⚙️ Implementation",
    "⚙️ SOLUTION",
    "✅ Test Cases",
    "✅ VERIFICATION",
    "🚀 Optimisations",
    "🚀 OPTIMISATION",
    "🐛 Root Cause",
    "🔬 Analysis",
    "🔧 Fix",
    "🔧 Fixed Code",
    "🧪 Prevention",
    "[ANALYSIS]",
    "[APPROACH]",
];

/// Reasoning lines pulled out of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThoughtBlock {
    pub header: &'static str,
    pub lines: Vec<String>,
}

impl ThoughtBlock {
    /// Lines joined with `\n`, as they appeared in the response.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// `div.thgt` with the header span and escaped lines joined by `<br>`.
    pub fn to_html(&self) -> String {
        let body = self
            .lines
            .iter()
            .map(|line| escape_html(line))
            .collect::<Vec<_>>()
            .join("<br>");
        format!(
            r#"<div class="thgt"><span class="thgt-h">{}</span>{body}</div>"#,
            self.header
        )
    }
}

/// Split `text` into the main answer and an optional thought block.
///
/// Marker-free text is returned unchanged. Otherwise the remaining main lines
/// are rejoined and trimmed.
pub fn split(text: &str) -> (String, Option<ThoughtBlock>) {
    let mut thought: Vec<&str> = Vec::new();
    let mut main: Vec<&str> = Vec::new();
    let mut in_thought = false;

    for line in text.split('\n') {
        let trimmed = line.trim();
        if THOUGHT_MARKERS.iter().any(|marker| trimmed.starts_with(marker)) {
            in_thought = true;
        }
        if in_thought {
            thought.push(line);
        } else {
            main.push(line);
        }
        if in_thought && trimmed.is_empty() && thought.len() > 1 {
            in_thought = false;
        }
    }

    if thought.is_empty() {
        return (text.to_string(), None);
    }
    (
        main.join("\n").trim().to_string(),
        Some(ThoughtBlock {
            header: THOUGHT_HEADER,
            lines: thought.into_iter().map(str::to_string).collect(),
        }),
    )
}
