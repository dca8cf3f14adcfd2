//! In-memory conversation session.
//!
//! A [`ChatSession`] is created at startup, passed explicitly to the request
//! loop and the REPL, reset by `/clear`, and dropped at exit. Nothing is
//! persisted to disk.

use chrono::Local;
use sha2::{Digest, Sha256};

use crate::prompt::{render_system_prompt, Mode};
use crate::stream::format_secs;
use crate::types::{ChatMessage, Role};

/// Figures recorded with each assistant turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnMetadata {
    /// Wall time from request start to finalization, two decimals.
    pub elapsed_seconds: f64,
    /// Characters in the stored content.
    pub char_count: usize,
    /// Mode active when the request was sent.
    pub mode: Mode,
}

/// One stored message.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
    /// `HH:MM:SS` for user turns, `HH:MM:SS  [<elapsed>s]` for assistant turns.
    pub timestamp: String,
    pub metadata: Option<TurnMetadata>,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: timestamp.into(),
            metadata: None,
        }
    }

    pub fn assistant(
        content: impl Into<String>,
        timestamp: impl Into<String>,
        metadata: TurnMetadata,
    ) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: timestamp.into(),
            metadata: Some(metadata),
        }
    }

    fn to_message(&self) -> ChatMessage {
        ChatMessage {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

/// Per-process conversation state.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: String,
    turns: Vec<ConversationTurn>,
    max_history_pairs: usize,
    query_count: usize,
    last_elapsed: Option<f64>,
    /// Selects the system prompt of the next request.
    pub mode: Mode,
    pub show_thoughts: bool,
    pub show_debug_info: bool,
}

impl ChatSession {
    /// Empty session keeping at most `2 * max_history_pairs` turns.
    pub fn new(max_history_pairs: usize) -> Self {
        Self {
            id: new_session_id(),
            turns: Vec::new(),
            max_history_pairs: max_history_pairs.max(1),
            query_count: 0,
            last_elapsed: None,
            mode: Mode::Normal,
            show_thoughts: true,
            show_debug_info: false,
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Eight uppercase hex characters.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// User messages sent since start or the last `/clear`.
    pub fn query_count(&self) -> usize {
        self.query_count
    }

    pub fn last_elapsed(&self) -> Option<f64> {
        self.last_elapsed
    }

    pub fn max_turns(&self) -> usize {
        self.max_history_pairs * 2
    }

    /// Stored turns relative to `max_history_pairs`, capped at 100.
    pub fn memory_percent(&self) -> usize {
        (self.turns.len() * 100 / self.max_history_pairs).min(100)
    }

    /// Record a user message stamped with the current time.
    pub fn push_user(&mut self, content: impl Into<String>) -> &ConversationTurn {
        let turn = ConversationTurn::user(content, clock_timestamp());
        self.query_count += 1;
        self.push_turn(turn)
    }

    /// Record a finished assistant response.
    pub fn push_assistant(
        &mut self,
        content: impl Into<String>,
        metadata: TurnMetadata,
    ) -> &ConversationTurn {
        let timestamp = format!(
            "{}  [{}s]",
            clock_timestamp(),
            format_secs(metadata.elapsed_seconds)
        );
        self.last_elapsed = Some(metadata.elapsed_seconds);
        self.push_turn(ConversationTurn::assistant(content, timestamp, metadata))
    }

    /// Append `turn`, dropping the oldest turns beyond [`Self::max_turns`].
    pub fn push_turn(&mut self, turn: ConversationTurn) -> &ConversationTurn {
        self.turns.push(turn);
        let max = self.max_turns();
        if self.turns.len() > max {
            let excess = self.turns.len() - max;
            self.turns.drain(..excess);
            tracing::debug!(dropped = excess, kept = max, "trimmed conversation history");
        }
        let last = self.turns.len() - 1;
        &self.turns[last]
    }

    /// Drop all turns and start over under a fresh id. Mode and display
    /// toggles survive.
    pub fn clear(&mut self) {
        self.id = new_session_id();
        self.turns.clear();
        self.query_count = 0;
        self.last_elapsed = None;
    }

    /// Request conversation for the newest stored turn.
    ///
    /// The system prompt for the active mode comes first, then up to
    /// `context_messages` turns that precede the newest one, then the newest
    /// turn itself.
    pub fn request_messages(
        &self,
        custom_instructions: Option<&str>,
        context_messages: usize,
    ) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::system(render_system_prompt(
            self.mode,
            custom_instructions,
        ))];
        let Some((newest, history)) = self.turns.split_last() else {
            return messages;
        };
        let start = history.len().saturating_sub(context_messages);
        messages.extend(history[start..].iter().map(ConversationTurn::to_message));
        messages.push(newest.to_message());
        messages
    }
}

fn clock_timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

fn new_session_id() -> String {
    let seed = format!(
        "{}-{}",
        Local::now().timestamp_nanos_opt().unwrap_or_default(),
        std::process::id()
    );
    let digest = Sha256::digest(seed.as_bytes());
    digest
        .iter()
        .take(4)
        .map(|b| format!("{b:02X}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(elapsed: f64) -> TurnMetadata {
        TurnMetadata {
            elapsed_seconds: elapsed,
            char_count: 1,
            mode: Mode::Normal,
        }
    }

    #[test]
    fn session_id_is_eight_upper_hex() {
        let session = ChatSession::new(30);
        assert_eq!(session.id().len(), 8);
        assert!(session
            .id()
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    #[test]
    fn retention_keeps_most_recent_turns_in_order() {
        let mut session = ChatSession::new(30);
        for i in 0..61 {
            session.push_turn(ConversationTurn::user(format!("m{i}"), "00:00:00"));
        }
        assert_eq!(session.turns().len(), 60);
        assert_eq!(session.turns()[0].content, "m1");
        assert_eq!(session.turns()[59].content, "m60");
        let contents: Vec<_> = session.turns().iter().map(|t| t.content.clone()).collect();
        let expected: Vec<_> = (1..61).map(|i| format!("m{i}")).collect();
        assert_eq!(contents, expected);
    }

    #[test]
    fn user_turns_count_queries_and_carry_clock_time() {
        let mut session = ChatSession::new(2);
        let turn = session.push_user("hi").clone();
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.timestamp.len(), 8);
        assert_eq!(turn.timestamp.matches(':').count(), 2);
        assert_eq!(session.query_count(), 1);
    }

    #[test]
    fn assistant_turn_records_elapsed() {
        let mut session = ChatSession::new(2);
        session.push_user("q");
        let turn = session.push_assistant("a", meta(1.5)).clone();
        assert!(turn.timestamp.ends_with("  [1.5s]"), "{}", turn.timestamp);
        assert_eq!(turn.metadata, Some(meta(1.5)));
        assert_eq!(session.last_elapsed(), Some(1.5));

        let whole = session.push_assistant("b", meta(0.0)).clone();
        assert!(whole.timestamp.ends_with("  [0.0s]"), "{}", whole.timestamp);
    }

    #[test]
    fn clear_resets_conversation_but_keeps_preferences() {
        let mut session = ChatSession::new(30).with_mode(Mode::Debug);
        session.show_thoughts = false;
        session.push_user("q");
        session.push_assistant("a", meta(0.4));
        session.clear();
        assert!(session.turns().is_empty());
        assert_eq!(session.query_count(), 0);
        assert_eq!(session.last_elapsed(), None);
        assert_eq!(session.mode, Mode::Debug);
        assert!(!session.show_thoughts);
        assert_eq!(session.id().len(), 8);
    }

    #[test]
    fn request_messages_window_excludes_newest_from_context_count() {
        let mut session = ChatSession::new(30).with_mode(Mode::CodeMaster);
        for i in 0..5 {
            session.push_turn(ConversationTurn::user(format!("old{i}"), "t"));
        }
        session.push_user("new");

        let messages = session.request_messages(None, 2);
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("CODE MASTER MODE ACTIVE"));
        assert_eq!(messages[1].content, "old3");
        assert_eq!(messages[2].content, "old4");
        assert_eq!(messages[3], ChatMessage::user("new"));
    }

    #[test]
    fn request_messages_with_zero_context() {
        let mut session = ChatSession::new(30);
        session.push_user("a");
        session.push_user("b");
        let messages = session.request_messages(Some("be brief"), 0);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].content.ends_with("be brief"));
        assert_eq!(messages[1].content, "b");
    }

    #[test]
    fn memory_percent_is_relative_to_pairs_and_capped() {
        let mut session = ChatSession::new(4);
        session.push_user("a");
        assert_eq!(session.memory_percent(), 25);
        for _ in 0..7 {
            session.push_user("x");
        }
        assert_eq!(session.memory_percent(), 100);
    }
}
