//! Rendering contract shared by the request loop and the REPL.
//!
//! `RenderSink` is the UI contract consumed by orchestration code. The
//! terminal renderer and the HTML transcript both implement it, and tests
//! substitute a recording sink without touching stdout.

use crate::format::{self, FormattedSegment};
use crate::session::{ChatSession, ConversationTurn};
use crate::stream::format_secs;
use crate::types::Role;
use crate::thought::{self, ThoughtBlock};
pub use crate::tui::renderer::TerminalRenderer;

/// Label drawn above user turns.
pub const USER_LABEL: &str = "⬡ YOU";
/// Label drawn above assistant turns.
pub const ASSISTANT_LABEL: &str = "⚡ CYBERBOT";

/// Facts shown in the startup header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHeader {
    pub version: String,
    pub model: String,
    /// Display name of the active mode.
    pub mode: String,
    pub session_id: String,
    /// Whether the model server answered the startup probe.
    pub online: bool,
}

/// Everything a renderer needs to draw one assistant turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantView {
    pub timestamp: String,
    /// Main answer with thought lines removed.
    pub segments: Vec<FormattedSegment>,
    /// Present only when thoughts are shown and the answer had any.
    pub thought: Option<ThoughtBlock>,
    /// Pre-formatted metadata line.
    pub debug: Option<String>,
}

impl AssistantView {
    /// Build the view for a stored assistant turn.
    ///
    /// `debug_model` turns on the metadata line and names the model in it; it
    /// is ignored for turns without metadata.
    pub fn from_turn(
        turn: &ConversationTurn,
        show_thoughts: bool,
        debug_model: Option<&str>,
    ) -> Self {
        let (main, thought) = thought::split(&turn.content);
        let debug = match (debug_model, &turn.metadata) {
            (Some(model), Some(meta)) => Some(format!(
                "⏱ {}s elapsed | ✎ {} chars | ◈ {} mode | ⬡ {model}",
                format_secs(meta.elapsed_seconds),
                meta.char_count,
                meta.mode.display_name()
            )),
            _ => None,
        };
        Self {
            timestamp: turn.timestamp.clone(),
            segments: format::segments(&main),
            thought: thought.filter(|_| show_thoughts),
            debug,
        }
    }
}

/// Status text drawn while a response is streaming.
pub fn interim_status(elapsed_secs: f64) -> String {
    format!(
        "{ASSISTANT_LABEL} — THINKING... ({}s)",
        format_secs(elapsed_secs)
    )
}

/// Draw every stored turn of `session` in order, honoring its display
/// toggles. `model` names the model in debug lines.
pub fn replay_history(session: &ChatSession, sink: &dyn RenderSink, model: &str) {
    let debug_model = session.show_debug_info.then_some(model);
    for turn in session.turns() {
        match turn.role {
            Role::Assistant => sink.assistant_message(&AssistantView::from_turn(
                turn,
                session.show_thoughts,
                debug_model,
            )),
            _ => sink.user_message(turn),
        }
    }
}

/// Injectable rendering interface used by orchestration code.
pub trait RenderSink: Send + Sync {
    /// Render the session header shown at startup.
    fn header(&self, header: &SessionHeader);
    /// Render one stored user turn.
    fn user_message(&self, turn: &ConversationTurn);
    /// Show a snapshot of the in-flight response. `text` is raw model output.
    fn interim(&self, text: &str, elapsed_secs: f64);
    /// Remove whatever [`RenderSink::interim`] drew.
    fn clear_interim(&self);
    /// Render one finished assistant turn.
    fn assistant_message(&self, view: &AssistantView);
    /// Render activity/lifecycle text.
    fn activity(&self, text: &str);
    /// Render a warning line.
    fn warn(&self, msg: &str);
    /// Render an error line.
    fn error(&self, msg: &str);
    /// Render a titled section divider.
    fn section(&self, title: &str);
    /// Render one key/value field row.
    fn field(&self, key: &str, value: &str);
    /// Render additional detail text.
    fn detail(&self, text: &str);
}

impl RenderSink for TerminalRenderer {
    fn header(&self, header: &SessionHeader) {
        self.header(header);
    }

    fn user_message(&self, turn: &ConversationTurn) {
        self.user_message(turn);
    }

    fn interim(&self, text: &str, elapsed_secs: f64) {
        self.interim(text, elapsed_secs);
    }

    fn clear_interim(&self) {
        self.clear_interim();
    }

    fn assistant_message(&self, view: &AssistantView) {
        self.assistant_message(view);
    }

    fn activity(&self, text: &str) {
        self.activity(text);
    }

    fn warn(&self, msg: &str) {
        self.warn(msg);
    }

    fn error(&self, msg: &str) {
        self.error(msg);
    }

    fn section(&self, title: &str) {
        self.section(title);
    }

    fn field(&self, key: &str, value: &str) {
        self.field(key, value);
    }

    fn detail(&self, text: &str) {
        self.detail(text);
    }
}
