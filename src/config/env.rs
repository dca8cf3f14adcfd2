//! Environment variable overrides.
//!
//! `CYBERBOT_*` variables win over file values. `OLLAMA_HOST` is honored as a
//! base-url fallback so an existing Ollama setup works unchanged.

use crate::error::ConfigError;

use super::Config;

pub(super) fn apply_runtime_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(url) = non_empty(env_lookup, "CYBERBOT_BASE_URL") {
        config.api.base_url = url;
    } else if let Some(host) = non_empty(env_lookup, "OLLAMA_HOST") {
        config.api.base_url = ollama_host_to_url(&host);
    }
    if let Some(model) = non_empty(env_lookup, "CYBERBOT_MODEL") {
        config.api.model = model;
    }
    if let Some(timeout) = non_empty(env_lookup, "CYBERBOT_API_TIMEOUT_SECS") {
        let parsed = timeout.parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid CYBERBOT_API_TIMEOUT_SECS value `{timeout}`: expected positive integer seconds"
            ))
        })?;
        config.api.timeout_secs = parsed.max(1);
    }
    if let Some(pairs) = non_empty(env_lookup, "CYBERBOT_MAX_HISTORY") {
        config.chat.max_history_pairs = pairs.parse::<usize>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid CYBERBOT_MAX_HISTORY value `{pairs}`: expected a positive integer"
            ))
        })?;
    }
    Ok(())
}

fn non_empty<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `OLLAMA_HOST` is usually `host:port` without a scheme.
fn ollama_host_to_url(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}
