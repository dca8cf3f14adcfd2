//! Default configuration constants.

/// Embedded default `cyberbot.toml` template written by `cyberbot init`.
pub(super) const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("../templates/cyberbot.toml");
/// Config file name used for both the local and per-user locations.
pub(super) const CONFIG_FILE_NAME: &str = "cyberbot.toml";
/// Directory under the user config root.
pub(super) const CONFIG_DIR_NAME: &str = "cyberbot";
/// Local Ollama server.
pub(super) const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";
pub(super) const DEFAULT_MODEL: &str = "hf.co/MaziyarPanahi/codegemma-2b-GGUF:Q4_k_M";
/// Whole-request timeout. Local models on CPU can take minutes per answer.
pub(super) const DEFAULT_API_TIMEOUT_SECS: u64 = 300;
pub(super) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
/// Stored conversation pairs (user + assistant) before the oldest are dropped.
pub(super) const DEFAULT_MAX_HISTORY_PAIRS: usize = 30;
/// Prior messages sent as context with each request.
pub(super) const DEFAULT_CONTEXT_MESSAGES: usize = 30;
