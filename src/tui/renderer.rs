//! Terminal output renderer for chat turns and status messages.
//!
//! Conversation turns go to stdout; the header, status lines, and the live
//! interim line go to stderr so piped output stays clean.

use crate::format::{BulletMarker, FormattedSegment, Span};
use crate::prompt::Mode;
use crate::session::ConversationTurn;
use crate::thought::ThoughtBlock;
use crate::tui::highlight::{highlight_code, StyledToken};
use crate::tui::settings;
use crate::tui::text::{clip_to_width, tail_single_line, visible_width, wrap_for_block};
use crate::ui::render::{interim_status, AssistantView, SessionHeader, ASSISTANT_LABEL, USER_LABEL};
use crossterm::style::{Color, Print, PrintStyledContent, Stylize};
use crossterm::terminal;
use crossterm::QueueableCommand;
use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockTone {
    /// Answer text on the terminal background.
    Prose,
    /// Fenced code inside a tinted frame.
    Code,
    /// Extracted reasoning lines.
    Thought,
}

impl BlockTone {
    fn bg(self) -> Option<Color> {
        match self {
            Self::Prose => None,
            Self::Code => Some(settings::COLOR_CODE_BG),
            Self::Thought => Some(settings::COLOR_THOUGHT_BG),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WrapMode {
    /// Soft-wrap long lines within the block width.
    Wrap,
    /// Clip long lines at the block width.
    Clip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RenderedRow {
    tokens: Vec<StyledToken>,
    tone: BlockTone,
}

impl RenderedRow {
    fn new(tokens: Vec<StyledToken>, tone: BlockTone) -> Self {
        Self { tokens, tone }
    }

    fn as_plain_text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}

/// Handles all terminal output formatting.
#[derive(Debug)]
pub struct TerminalRenderer {
    /// Whether ANSI color/style output is enabled.
    color: bool,
    /// Whether an interim status line is currently drawn on stderr.
    interim_active: AtomicBool,
}

impl TerminalRenderer {
    /// Create a renderer with optional color output.
    pub fn new(color: bool) -> Self {
        Self {
            color,
            interim_active: AtomicBool::new(false),
        }
    }

    /// Print the input prompt with the active mode badge (to stderr).
    pub fn prompt(&self, mode: Mode) {
        if self.color {
            eprint!(
                "{} {} ",
                format!("[{}]", mode.badge()).with(settings::COLOR_PROMPT_BADGE),
                settings::PROMPT_SYMBOL
                    .with(settings::COLOR_PROMPT_SYMBOL)
                    .bold()
            );
        } else {
            eprint!("[{}] {}", mode.badge(), settings::PROMPT_PLAIN);
        }
        let _ = io::stderr().flush();
    }

    /// Print the startup header (to stderr).
    pub fn header(&self, header: &SessionHeader) {
        let status = if header.online {
            settings::LABEL_ONLINE
        } else {
            settings::LABEL_OFFLINE
        };
        if self.color {
            let status_color = if header.online {
                settings::COLOR_ONLINE
            } else {
                settings::COLOR_OFFLINE
            };
            eprintln!(
                "\r{} {}  {}",
                ASSISTANT_LABEL
                    .with(settings::COLOR_ASSISTANT_LABEL)
                    .bold(),
                header.version.as_str().with(settings::COLOR_TIMESTAMP),
                status.with(status_color).bold(),
            );
        } else {
            eprintln!("\r{ASSISTANT_LABEL} {}  {status}", header.version);
        }
        self.field("model", &header.model);
        self.field("mode", &header.mode);
        self.field("session", &header.session_id);
        eprintln!();
    }

    /// Print the hint shown before the first question (to stderr).
    pub fn empty_state(&self) {
        if self.color {
            eprintln!(
                "\r{}{}",
                settings::INDENT_1,
                settings::EMPTY_STATE_HINT
                    .with(settings::COLOR_SECTION_TITLE)
                    .bold()
            );
        } else {
            eprintln!("\r{}{}", settings::INDENT_1, settings::EMPTY_STATE_HINT);
        }
        for example in settings::EXAMPLE_PROMPTS {
            self.detail(&format!("{} {example}", settings::GLYPH_BULLET));
        }
        eprintln!();
    }

    /// Print one user turn (to stdout).
    pub fn user_message(&self, turn: &ConversationTurn) {
        let width = block_content_width();
        let rows = turn
            .content
            .split('\n')
            .flat_map(|line| wrap_for_block(line, width))
            .map(|line| {
                RenderedRow::new(
                    vec![StyledToken::new(line, settings::RGB_TEXT)],
                    BlockTone::Prose,
                )
            })
            .collect::<Vec<_>>();
        self.print_turn(
            USER_LABEL,
            settings::COLOR_USER_LABEL,
            &turn.timestamp,
            &rows,
            width,
        );
    }

    /// Redraw the interim status line with the tail of `text` (to stderr).
    ///
    /// Only drawn on a color terminal; plain output shows the final answer
    /// alone.
    pub fn interim(&self, text: &str, elapsed_secs: f64) {
        if !self.color || !io::stderr().is_terminal() {
            return;
        }
        let status = interim_status(elapsed_secs);
        let room = block_content_width().saturating_sub(visible_width(&status) + 5);
        let tail = tail_single_line(text, room);
        let mut err = io::stderr();
        let drawn = err
            .queue(Print(settings::CLEAR_LINE))
            .and_then(|out| {
                out.queue(PrintStyledContent(
                    status.as_str().with(settings::COLOR_INTERIM_STATUS).bold(),
                ))
            })
            .and_then(|out| out.queue(Print(" ")))
            .and_then(|out| {
                out.queue(PrintStyledContent(
                    tail.as_str().with(settings::COLOR_INTERIM_TEXT),
                ))
            })
            .and_then(|out| {
                out.queue(PrintStyledContent(
                    settings::INTERIM_CURSOR.with(settings::COLOR_INTERIM_STATUS),
                ))
            })
            .and_then(|out| out.flush());
        if drawn.is_ok() {
            self.interim_active.store(true, Ordering::Relaxed);
        }
    }

    /// Erase the interim status line if one is drawn.
    pub fn clear_interim(&self) {
        if self.interim_active.swap(false, Ordering::Relaxed) {
            eprint!("{}", settings::CLEAR_LINE);
            let _ = io::stderr().flush();
        }
    }

    /// Print one finished assistant turn (to stdout).
    pub fn assistant_message(&self, view: &AssistantView) {
        let width = block_content_width();
        let rows = view_rows(view, width);
        self.print_turn(
            ASSISTANT_LABEL,
            settings::COLOR_ASSISTANT_LABEL,
            &view.timestamp,
            &rows,
            width,
        );
    }

    /// Print a warning (to stderr).
    pub fn warn(&self, msg: &str) {
        if self.color {
            eprintln!(
                "\r{} {msg}",
                settings::LABEL_WARNING.with(settings::COLOR_WARNING).bold()
            );
        } else {
            eprintln!("\r{} {msg}", settings::LABEL_WARNING);
        }
    }

    /// Print an error (to stderr).
    pub fn error(&self, msg: &str) {
        if self.color {
            eprintln!(
                "\r{} {msg}",
                settings::LABEL_ERROR.with(settings::COLOR_ERROR).bold()
            );
        } else {
            eprintln!("\r{} {msg}", settings::LABEL_ERROR);
        }
    }

    /// Print a small section header in status-style output.
    pub fn section(&self, title: &str) {
        if self.color {
            eprintln!(
                "\r{} {}",
                settings::GLYPH_SECTION_BULLET.with(settings::COLOR_SECTION_BULLET),
                title.with(settings::COLOR_SECTION_TITLE).bold()
            );
        } else {
            eprintln!("\r{title}:");
        }
    }

    /// Print an activity line for lifecycle updates.
    pub fn activity(&self, text: &str) {
        if self.color {
            eprintln!(
                "\r{} {}",
                settings::GLYPH_SECTION_BULLET.with(settings::COLOR_SECTION_BULLET),
                text.with(settings::COLOR_ACTIVITY_TEXT).bold()
            );
        } else {
            eprintln!("\r{text}");
        }
    }

    /// Print a key/value line under a status section.
    pub fn field(&self, key: &str, value: &str) {
        if self.color {
            eprintln!(
                "\r{}{} {}",
                settings::INDENT_1,
                format!("{key}:").with(settings::COLOR_FIELD_KEY),
                value.with(settings::COLOR_FIELD_VALUE),
            );
        } else {
            eprintln!("\r{}{key}: {value}", settings::INDENT_1);
        }
    }

    /// Print a simple indented detail line.
    pub fn detail(&self, text: &str) {
        if self.color {
            eprintln!(
                "\r{}{}",
                settings::INDENT_1,
                text.with(settings::COLOR_FIELD_VALUE)
            );
        } else {
            eprintln!("\r{}{text}", settings::INDENT_1);
        }
    }

    fn print_turn(
        &self,
        label: &str,
        label_color: Color,
        timestamp: &str,
        rows: &[RenderedRow],
        width: usize,
    ) {
        let mut stdout = io::stdout();
        let written = self
            .write_label(&mut stdout, label, label_color, timestamp)
            .and_then(|_| self.write_rows(&mut stdout, rows, width))
            .and_then(|_| stdout.queue(Print("\r\n")).map(|_| ()))
            .and_then(|_| stdout.flush());
        if written.is_err() {
            // Degrade to plain printing if terminal queueing fails.
            println!("{label}  {timestamp}");
            for row in rows {
                println!("{}{}", settings::INDENT_1, row.as_plain_text());
            }
            println!();
        }
    }

    fn write_label<W: Write + QueueableCommand>(
        &self,
        out: &mut W,
        label: &str,
        label_color: Color,
        timestamp: &str,
    ) -> io::Result<()> {
        out.queue(Print("\r"))?;
        if self.color {
            out.queue(PrintStyledContent(label.with(label_color).bold()))?;
            out.queue(Print("  "))?;
            out.queue(PrintStyledContent(
                timestamp.with(settings::COLOR_TIMESTAMP),
            ))?;
        } else {
            out.queue(Print(format!("{label}  {timestamp}")))?;
        }
        out.queue(Print("\r\n"))?;
        Ok(())
    }

    fn write_rows<W: Write + QueueableCommand>(
        &self,
        out: &mut W,
        rows: &[RenderedRow],
        block_width: usize,
    ) -> io::Result<()> {
        // Each row is "\r" + indent + styled payload (+ tinted padding) + "\r\n".
        for row in rows {
            out.queue(Print("\r"))?;
            out.queue(Print(settings::INDENT_1))?;
            if self.color {
                let bg = row.tone.bg();
                let mut used = 0usize;
                for token in &row.tokens {
                    if used >= block_width {
                        break;
                    }
                    let clipped = clip_to_width(&token.text, block_width - used);
                    if clipped.is_empty() {
                        continue;
                    }
                    used += visible_width(&clipped);
                    let (r, g, b) = token.rgb;
                    let mut styled = clipped.as_str().with(Color::Rgb { r, g, b });
                    if let Some(bg) = bg {
                        styled = styled.on(bg);
                    }
                    if token.bold {
                        styled = styled.bold();
                    }
                    if token.italic {
                        styled = styled.italic();
                    }
                    if token.underline {
                        styled = styled.underlined();
                    }
                    out.queue(PrintStyledContent(styled))?;
                }
                if let Some(bg) = bg {
                    let pad = block_width.saturating_sub(used);
                    if pad > 0 {
                        out.queue(PrintStyledContent(" ".repeat(pad).on(bg)))?;
                    }
                }
            } else {
                out.queue(Print(clip_to_width(&row.as_plain_text(), block_width)))?;
            }
            out.queue(Print("\r\n"))?;
        }
        Ok(())
    }
}

fn block_content_width() -> usize {
    let cols = terminal::size()
        .map(|(w, _)| w as usize)
        .unwrap_or(settings::BLOCK_FALLBACK_COLUMNS);
    let indent = settings::INDENT_1.chars().count();
    cols.saturating_sub(indent + settings::BLOCK_RIGHT_MARGIN)
        .max(1)
}

// ---------------------------------------------------------------------------
// Assistant layout
// ---------------------------------------------------------------------------

/// Lay out an assistant view: thought block, answer segments, debug line.
fn view_rows(view: &AssistantView, width: usize) -> Vec<RenderedRow> {
    let mut rows = Vec::new();
    if let Some(thought) = &view.thought {
        rows.extend(thought_rows(thought, width));
    }
    for segment in &view.segments {
        rows.extend(segment_rows(segment, width));
    }
    if let Some(debug) = &view.debug {
        rows.push(RenderedRow::new(
            vec![StyledToken::new(debug.as_str(), settings::RGB_DEBUG)],
            BlockTone::Prose,
        ));
    }
    rows
}

fn thought_rows(thought: &ThoughtBlock, width: usize) -> Vec<RenderedRow> {
    let mut header = StyledToken::new(thought.header, settings::RGB_THOUGHT_HEADER);
    header.bold = true;
    let mut rows = vec![RenderedRow::new(vec![header], BlockTone::Thought)];
    for line in &thought.lines {
        for wrapped in wrap_for_block(line, width) {
            let mut token = StyledToken::new(wrapped, settings::RGB_THOUGHT_TEXT);
            token.italic = true;
            rows.push(RenderedRow::new(vec![token], BlockTone::Thought));
        }
    }
    rows
}

fn segment_rows(segment: &FormattedSegment, width: usize) -> Vec<RenderedRow> {
    let tokens = match segment {
        FormattedSegment::CodeBlock { language, body } => {
            return code_rows(language, body, width);
        }
        FormattedSegment::SectionHeader { spans } => {
            let mut tokens = Vec::new();
            push_spans(spans, InlineStyle::heading(), &mut tokens);
            tokens
        }
        FormattedSegment::BulletLine { marker, spans } => {
            let glyph = match marker {
                BulletMarker::Arrow => format!("{} ", settings::GLYPH_BULLET),
                BulletMarker::Number(number) => format!("{number} "),
            };
            let mut tokens = vec![StyledToken::new(glyph, settings::RGB_BULLET)];
            push_spans(spans, InlineStyle::text(), &mut tokens);
            tokens
        }
        FormattedSegment::PlainLine { spans } => {
            let mut tokens = Vec::new();
            push_spans(spans, InlineStyle::text(), &mut tokens);
            tokens
        }
    };
    split_tokens(&tokens, width, WrapMode::Wrap)
        .into_iter()
        .map(|row| RenderedRow::new(row, BlockTone::Prose))
        .collect()
}

fn code_rows(language: &str, body: &str, width: usize) -> Vec<RenderedRow> {
    let frame = |text: String| {
        RenderedRow::new(
            vec![StyledToken::new(text, settings::RGB_CODE_FRAME)],
            BlockTone::Code,
        )
    };
    let lines: Vec<&str> = body.split('\n').collect();
    let highlighted = highlight_code(language, &lines);

    let mut rows = vec![frame(format!(
        "{} // {language}  {}",
        settings::FRAME_TOP,
        settings::CODE_TAG
    ))];
    let inner = width.saturating_sub(visible_width(settings::FRAME_SIDE)).max(1);
    for (idx, line) in lines.iter().enumerate() {
        let tokens = highlighted
            .as_ref()
            .and_then(|all| all.get(idx).cloned())
            .unwrap_or_else(|| vec![StyledToken::new(*line, settings::RGB_CODE_TEXT)]);
        for row in split_tokens(&tokens, inner, WrapMode::Clip) {
            let mut full = vec![StyledToken::new(settings::FRAME_SIDE, settings::RGB_CODE_FRAME)];
            full.extend(row);
            rows.push(RenderedRow::new(full, BlockTone::Code));
        }
    }
    rows.push(frame(settings::FRAME_BOTTOM.to_string()));
    rows
}

#[derive(Debug, Clone, Copy)]
struct InlineStyle {
    rgb: (u8, u8, u8),
    bold: bool,
    italic: bool,
}

impl InlineStyle {
    fn text() -> Self {
        Self {
            rgb: settings::RGB_TEXT,
            bold: false,
            italic: false,
        }
    }

    fn heading() -> Self {
        Self {
            rgb: settings::RGB_HEADING,
            bold: true,
            italic: false,
        }
    }

    fn token(self, text: &str) -> StyledToken {
        StyledToken {
            text: text.to_string(),
            rgb: self.rgb,
            bold: self.bold,
            italic: self.italic,
            underline: false,
        }
    }
}

fn push_spans(spans: &[Span], style: InlineStyle, out: &mut Vec<StyledToken>) {
    for span in spans {
        match span {
            Span::Text(text) => out.push(style.token(text)),
            Span::Bold(children) => push_spans(
                children,
                InlineStyle {
                    rgb: settings::RGB_BOLD,
                    bold: true,
                    ..style
                },
                out,
            ),
            Span::Italic(children) => push_spans(
                children,
                InlineStyle {
                    rgb: settings::RGB_ITALIC,
                    italic: true,
                    ..style
                },
                out,
            ),
            Span::InlineCode(code) => out.push(
                InlineStyle {
                    rgb: settings::RGB_INLINE_CODE,
                    ..style
                }
                .token(code),
            ),
        }
    }
}

/// Split styled tokens into wrapped/clipped rows while preserving style spans.
fn split_tokens(tokens: &[StyledToken], width: usize, wrap_mode: WrapMode) -> Vec<Vec<StyledToken>> {
    if tokens.is_empty() {
        return vec![Vec::new()];
    }

    let mut rows = Vec::<Vec<StyledToken>>::new();
    let mut current = Vec::<StyledToken>::new();
    let mut used = 0usize;

    'token_loop: for token in tokens {
        for ch in token.text.chars() {
            if used >= width {
                match wrap_mode {
                    WrapMode::Wrap => {
                        rows.push(current);
                        current = Vec::new();
                        used = 0;
                    }
                    WrapMode::Clip => break 'token_loop,
                }
            }
            push_styled_char(&mut current, token, ch);
            used += 1;
        }
    }
    rows.push(current);
    rows
}

/// Append one char to the current row, merging with previous token when style matches.
fn push_styled_char(current: &mut Vec<StyledToken>, style: &StyledToken, ch: char) {
    if let Some(last) = current.last_mut() {
        if same_style(last, style) {
            last.text.push(ch);
            return;
        }
    }

    current.push(StyledToken {
        text: ch.to_string(),
        rgb: style.rgb,
        bold: style.bold,
        italic: style.italic,
        underline: style.underline,
    });
}

/// Compare style attributes while ignoring token text content.
fn same_style(a: &StyledToken, b: &StyledToken) -> bool {
    a.rgb == b.rgb && a.bold == b.bold && a.italic == b.italic && a.underline == b.underline
}
