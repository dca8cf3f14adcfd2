//! Application entry orchestration for the cyberbot CLI.

use crate::app::exec_mode::run_exec_mode;
use crate::app::init_flow::run_init_flow;
use crate::app::repl_loop::run_repl;
use crate::cli;
use cyberbot::api::OllamaClient;
use cyberbot::chat::RequestSettings;
use cyberbot::config::{load_config, normalize_and_validate, Config};
use cyberbot::prompt::Mode;
use cyberbot::session::ChatSession;
use cyberbot::tui::TerminalRenderer;

/// Run the CLI and return the process exit code.
pub(crate) async fn run(args: cli::Args) -> i32 {
    if let Some(cli::Command::Init { force }) = args.command {
        let renderer = TerminalRenderer::new(!args.no_color);
        return match run_init_flow(&renderer, force) {
            Ok(()) => 0,
            Err(msg) => {
                renderer.error(&msg);
                1
            }
        };
    }

    let config = match load_config_state(&args) {
        Ok(config) => config,
        Err(msg) => {
            TerminalRenderer::new(!args.no_color).error(&msg);
            return 1;
        }
    };

    let renderer = TerminalRenderer::new(config.display.color);
    let client = match OllamaClient::new(&config.api) {
        Ok(client) => client,
        Err(err) => {
            renderer.error(&format!("failed to build http client: {err}"));
            return 1;
        }
    };

    let mut session = ChatSession::new(config.chat.max_history_pairs)
        .with_mode(config.chat.default_mode);
    session.show_thoughts = config.chat.show_thoughts;
    session.show_debug_info = config.chat.show_debug_info;
    let settings = RequestSettings::from_config(&config);
    tracing::debug!(
        session = session.id(),
        base_url = client.base_url(),
        model = %settings.model,
        "session started"
    );

    match args.prompt.as_deref() {
        Some(prompt) => {
            run_exec_mode(
                &renderer,
                &client,
                &settings,
                &mut session,
                prompt,
                args.html.as_deref(),
            )
            .await
        }
        None => run_repl(&renderer, &client, &settings, &mut session).await,
    }
}

fn load_config_state(args: &cli::Args) -> Result<Config, String> {
    let loaded = load_config(args.config.as_deref()).map_err(|e| format!("config error: {e}"))?;
    tracing::info!(source = %loaded.source.describe(), "loaded config");
    let mut config = loaded.config;
    apply_cli_overrides(&mut config, args)?;
    Ok(config)
}

/// Fold command-line flags over the loaded config and re-validate.
pub(crate) fn apply_cli_overrides(config: &mut Config, args: &cli::Args) -> Result<(), String> {
    if let Some(model) = &args.model {
        config.api.model = model.clone();
    }
    if let Some(base_url) = &args.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(mode) = &args.mode {
        config.chat.default_mode = mode.parse::<Mode>()?;
    }
    if args.no_color {
        config.display.color = false;
    }
    if args.no_thoughts {
        config.chat.show_thoughts = false;
    }
    if args.debug_info {
        config.chat.show_debug_info = true;
    }
    normalize_and_validate(config).map_err(|e| format!("config error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn overrides(argv: &[&str]) -> Result<Config, String> {
        let args = cli::Args::parse_from(argv);
        let mut config = Config::default();
        apply_cli_overrides(&mut config, &args)?;
        Ok(config)
    }

    #[test]
    fn no_flags_keep_defaults() {
        let config = overrides(&["cyberbot"]).unwrap();
        let defaults = Config::default();
        assert_eq!(config.api.model, defaults.api.model);
        assert_eq!(config.chat.default_mode, Mode::Normal);
        assert!(config.display.color);
        assert!(config.chat.show_thoughts);
    }

    #[test]
    fn flags_override_loaded_values() {
        let config = overrides(&[
            "cyberbot",
            "-m",
            "qwen2.5-coder",
            "--base-url",
            "http://gpu-box:11434/",
            "--mode",
            "code-master",
            "--no-color",
            "--no-thoughts",
            "--debug-info",
        ])
        .unwrap();
        assert_eq!(config.api.model, "qwen2.5-coder");
        assert_eq!(config.api.base_url, "http://gpu-box:11434");
        assert_eq!(config.chat.default_mode, Mode::CodeMaster);
        assert!(!config.display.color);
        assert!(!config.chat.show_thoughts);
        assert!(config.chat.show_debug_info);
    }

    #[test]
    fn bad_overrides_are_rejected() {
        assert!(overrides(&["cyberbot", "--mode", "turbo"]).is_err());
        let err = overrides(&["cyberbot", "--base-url", "gpu-box:11434"]).unwrap_err();
        assert!(err.contains("base_url"), "{err}");
        assert!(overrides(&["cyberbot", "-m", "  "]).is_err());
    }
}
