//! HTTP client for a local Ollama server.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;

use super::ndjson::{parse_chunk_line, NdjsonDecoder};
use super::{TokenSource, TokenStream};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::types::ChatRequest;

/// Reachability checks should fail fast even when generation timeouts are long.
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Talks to `/api/chat` and `/api/tags` on one server.
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl TokenSource for OllamaClient {
    async fn probe(&self) -> Result<(), ApiError> {
        let response = self
            .http
            .get(self.url("/api/tags"))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "model server probe failed"))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "model server probe rejected");
            return Err(ApiError::Status(status.as_u16(), body));
        }
        Ok(())
    }

    async fn open(&self, request: &ChatRequest) -> Result<Box<dyn TokenStream>, ApiError> {
        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            "opening chat stream"
        );
        let response = self
            .http
            .post(self.url("/api/chat"))
            .json(request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status(status.as_u16(), status_body(&body)));
        }
        Ok(Box::new(OllamaTokenStream::new(response)))
    }
}

/// Ollama reports failures as `{"error": "..."}`; fall back to the raw body.
fn status_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Token stream over a chunked NDJSON response body.
pub struct OllamaTokenStream {
    response: reqwest::Response,
    decoder: NdjsonDecoder,
    pending: VecDeque<Result<String, ApiError>>,
    finished: bool,
}

impl OllamaTokenStream {
    fn new(response: reqwest::Response) -> Self {
        Self {
            response,
            decoder: NdjsonDecoder::new(),
            pending: VecDeque::new(),
            finished: false,
        }
    }

    fn absorb_line(&mut self, line: &str) {
        if self.finished {
            return;
        }
        match parse_chunk_line(line) {
            Ok(chunk) => {
                if let Some(token) = chunk.token() {
                    self.pending.push_back(Ok(token.to_string()));
                }
                if chunk.done {
                    self.finished = true;
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "chat stream reported an error");
                self.pending.push_back(Err(err));
                self.finished = true;
            }
        }
    }
}

#[async_trait]
impl TokenStream for OllamaTokenStream {
    async fn next_token(&mut self) -> Option<Result<String, ApiError>> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                return Some(item);
            }
            if self.finished {
                return None;
            }
            match self.response.chunk().await {
                Ok(Some(bytes)) => {
                    for line in self.decoder.push(&bytes) {
                        self.absorb_line(&line);
                    }
                }
                Ok(None) => {
                    if let Some(line) = self.decoder.finish() {
                        self.absorb_line(&line);
                    }
                    if !self.finished {
                        tracing::debug!("chat stream closed without a done marker");
                        self.finished = true;
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "chat stream transport failed");
                    self.finished = true;
                    return Some(Err(ApiError::Http(err)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_body_prefers_error_field() {
        assert_eq!(
            status_body(r#"{"error":"model \"x\" not found, try pulling it first"}"#),
            "model \"x\" not found, try pulling it first"
        );
        assert_eq!(status_body("  Bad Gateway \n"), "Bad Gateway");
    }

    #[test]
    fn new_trims_trailing_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:11434/".into(),
            ..ApiConfig::default()
        };
        let client = OllamaClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:11434");
        assert_eq!(client.url("/api/tags"), "http://localhost:11434/api/tags");
    }
}
