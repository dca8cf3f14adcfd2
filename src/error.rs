//! Unified error types for the chat client.

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// Errors from the model-server transport layer.
#[derive(Debug)]
pub enum ApiError {
    /// Network / reqwest-level error (connection refused, timeout, ...).
    Http(reqwest::Error),
    /// Non-2xx status from the server.
    Status(u16, String),
    /// A stream line could not be decoded.
    InvalidResponse(String),
    /// The server reported an error inside the stream body.
    Model(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Status(code, body) => write!(f, "status {code}: {body}"),
            Self::InvalidResponse(msg) => write!(f, "invalid response: {msg}"),
            Self::Model(msg) => write!(f, "model error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

// ---------------------------------------------------------------------------
// ChatError (request loop)
// ---------------------------------------------------------------------------

/// Errors that stop a chat request before any turn is recorded.
///
/// Failures after streaming has started are not errors: they are folded into
/// the stored turn as an inline annotation.
#[derive(Debug)]
pub enum ChatError {
    /// The submitted text was blank.
    EmptyInput,
    /// The model server could not be reached before the request started.
    TokenSourceUnavailable(ApiError),
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "input is empty"),
            Self::TokenSourceUnavailable(e) => write!(f, "model server unavailable: {e}"),
        }
    }
}

impl std::error::Error for ChatError {}
