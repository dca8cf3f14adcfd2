//! Token-source seam and its Ollama HTTP implementation.
//!
//! - `client`: `/api/chat` streaming + `/api/tags` reachability probe
//! - `ndjson`: newline-delimited JSON framing for streamed bodies

use crate::error::ApiError;
use crate::types::ChatRequest;
use async_trait::async_trait;

mod client;
mod ndjson;

pub use client::{OllamaClient, OllamaTokenStream};
pub use ndjson::{parse_chunk_line, NdjsonDecoder};

/// Produces a live token sequence for one chat request.
///
/// The request loop only depends on this trait, so tests can drive it with a
/// scripted source instead of a network server.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Check that the model server is reachable before a request is issued.
    async fn probe(&self) -> Result<(), ApiError>;

    /// Start a streamed completion for `request`.
    async fn open(&self, request: &ChatRequest) -> Result<Box<dyn TokenStream>, ApiError>;
}

/// An in-flight sequence of text fragments.
///
/// `None` means the model finished normally; `Some(Err(_))` is a transport or
/// server failure after which the stream must not be polled again.
#[async_trait]
pub trait TokenStream: Send {
    async fn next_token(&mut self) -> Option<Result<String, ApiError>>;
}
