//! Data model for the Ollama `/api/chat` streaming API.
//!
//! These types serialize/deserialize directly to/from the JSON payloads the
//! local model server expects and emits.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Message roles
// ---------------------------------------------------------------------------

/// Conversation participant role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction message.
    System,
    /// End-user message.
    User,
    /// Assistant/model message.
    Assistant,
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// A single message in the request conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Sampling parameters
// ---------------------------------------------------------------------------

/// Model sampling options, sent as the `options` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingParams {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub repeat_penalty: f64,
    /// Maximum number of tokens to generate.
    #[serde(rename(serialize = "num_predict"), alias = "num_predict")]
    pub max_tokens: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.65,
            top_p: 0.92,
            top_k: 40,
            repeat_penalty: 1.1,
            max_tokens: 4096,
        }
    }
}

// ---------------------------------------------------------------------------
// Chat request / streamed response
// ---------------------------------------------------------------------------

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier known to the server.
    pub model: String,
    /// System prompt, prior history, then the new user message.
    pub messages: Vec<ChatMessage>,
    /// Always `true`; responses arrive as newline-delimited JSON.
    pub stream: bool,
    pub options: SamplingParams,
}

/// One newline-delimited object of a streamed `/api/chat` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatChunk {
    /// Partial assistant message for this chunk.
    #[serde(default)]
    pub message: Option<ChunkMessage>,
    /// True on the final object of the stream.
    #[serde(default)]
    pub done: bool,
    /// Set when the server aborts generation mid-stream.
    #[serde(default)]
    pub error: Option<String>,
}

/// The message fragment carried by a [`ChatChunk`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkMessage {
    #[serde(default)]
    pub content: String,
}

impl ChatChunk {
    /// Token text carried by this chunk, if any.
    pub fn token(&self) -> Option<&str> {
        self.message
            .as_ref()
            .map(|m| m.content.as_str())
            .filter(|s| !s.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
