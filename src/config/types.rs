//! Configuration data model.
//!
//! Struct/enum definitions plus default values. Source resolution and
//! validation live in `config::mod`.

use serde::Deserialize;
use std::path::PathBuf;

use super::defaults::{
    DEFAULT_API_TIMEOUT_SECS, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS,
    DEFAULT_CONTEXT_MESSAGES, DEFAULT_MAX_HISTORY_PAIRS, DEFAULT_MODEL,
};
use crate::prompt::Mode;
use crate::types::SamplingParams;

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api: ApiConfig,
    pub sampling: SamplingParams,
    pub chat: ChatConfig,
    pub display: DisplayConfig,
}

/// Model server connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Conversation behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChatConfig {
    /// Stored turns are capped at twice this value.
    pub max_history_pairs: usize,
    /// How many stored messages accompany each request.
    pub context_messages: usize,
    pub default_mode: Mode,
    pub show_thoughts: bool,
    pub show_debug_info: bool,
    /// Appended to every system prompt when non-empty.
    pub custom_instructions: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_history_pairs: DEFAULT_MAX_HISTORY_PAIRS,
            context_messages: DEFAULT_CONTEXT_MESSAGES,
            default_mode: Mode::Normal,
            show_thoughts: true,
            show_debug_info: false,
            custom_instructions: String::new(),
        }
    }
}

/// Display / rendering preferences.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Where the loaded configuration text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Local(PathBuf),
    Global(PathBuf),
    BuiltInDefaults,
}

impl ConfigSource {
    /// Short description for the startup banner.
    pub fn describe(&self) -> String {
        match self {
            Self::Explicit(path) | Self::Local(path) | Self::Global(path) => {
                path.display().to_string()
            }
            Self::BuiltInDefaults => "built-in defaults".to_string(),
        }
    }
}

/// Configuration payload plus the file it was read from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

/// Result of explicit global config initialization (`cyberbot init`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalConfigInitResult {
    Created { path: PathBuf },
    AlreadyInitialized { path: PathBuf },
    Overwritten { path: PathBuf, backup_path: PathBuf },
}
