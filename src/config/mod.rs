//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`CYBERBOT_BASE_URL`/`OLLAMA_HOST`,
//!    `CYBERBOT_MODEL`, `CYBERBOT_API_TIMEOUT_SECS`, `CYBERBOT_MAX_HISTORY`)
//! 2. TOML file specified via --config CLI flag
//! 3. ./cyberbot.toml in the current directory
//! 4. $XDG_CONFIG_HOME/cyberbot/cyberbot.toml (or ~/.config/cyberbot/cyberbot.toml)
//! 5. Built-in defaults
//!
//! Only the first file found is read; files are not merged.

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

mod defaults;
mod env;
mod init;
mod types;

use defaults::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use init::{config_root_dir, default_global_config_path, initialize_default_global_config};
pub use types::{
    ApiConfig, ChatConfig, Config, ConfigSource, DisplayConfig, GlobalConfigInitResult,
    LoadedConfig,
};

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<LoadedConfig, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<LoadedConfig, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (text, source) = read_config_text(path_override, &read_file, &config_root)?;
    tracing::debug!(source = %source.describe(), "resolved config source");

    let mut config: Config = toml::from_str(&text)?;
    env::apply_runtime_env_overrides(&mut config, &env_lookup)?;
    normalize(&mut config);
    validate(&config)?;

    Ok(LoadedConfig { config, source })
}

fn read_config_text<FRead, FRoot>(
    path_override: Option<&str>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<(String, ConfigSource), ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    if let Some(p) = path_override {
        // An explicit path that cannot be read is an error, not a fallthrough.
        let path = PathBuf::from(p);
        let text = read_file(&path)?;
        return Ok((text, ConfigSource::Explicit(path)));
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if let Ok(text) = read_file(&local) {
        return Ok((text, ConfigSource::Local(local)));
    }
    if let Some(dir) = config_root() {
        let global = dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
        if let Ok(text) = read_file(&global) {
            return Ok((text, ConfigSource::Global(global)));
        }
    }

    Ok((String::new(), ConfigSource::BuiltInDefaults))
}

/// Re-apply normalization and validation after in-memory edits such as CLI
/// overrides.
pub fn normalize_and_validate(config: &mut Config) -> Result<(), ConfigError> {
    normalize(config);
    validate(config)
}

fn normalize(config: &mut Config) {
    let trimmed = config.api.base_url.trim().trim_end_matches('/').to_string();
    config.api.base_url = trimmed;
    config.api.model = config.api.model.trim().to_string();
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.api.base_url.is_empty() {
        return Err(ConfigError::Invalid("api.base_url must not be empty".into()));
    }
    if !config.api.base_url.starts_with("http://") && !config.api.base_url.starts_with("https://")
    {
        return Err(ConfigError::Invalid(format!(
            "api.base_url `{}` must start with http:// or https://",
            config.api.base_url
        )));
    }
    if config.api.model.is_empty() {
        return Err(ConfigError::Invalid("api.model must not be empty".into()));
    }
    if config.api.timeout_secs == 0 || config.api.connect_timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "api timeouts must be at least 1 second".into(),
        ));
    }
    if config.chat.max_history_pairs == 0 {
        return Err(ConfigError::Invalid(
            "chat.max_history_pairs must be positive".into(),
        ));
    }
    let sampling = &config.sampling;
    if sampling.temperature.is_nan() || sampling.temperature < 0.0 {
        return Err(ConfigError::Invalid(format!(
            "sampling.temperature must be >= 0, got {}",
            sampling.temperature
        )));
    }
    if !(sampling.top_p > 0.0 && sampling.top_p <= 1.0) {
        return Err(ConfigError::Invalid(format!(
            "sampling.top_p must be in (0, 1], got {}",
            sampling.top_p
        )));
    }
    if sampling.max_tokens == 0 {
        return Err(ConfigError::Invalid(
            "sampling.max_tokens must be positive".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
