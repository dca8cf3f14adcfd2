//! `cyberbot init` orchestration.

use cyberbot::config::{default_global_config_path, initialize_default_global_config, GlobalConfigInitResult};
use cyberbot::ui::render::RenderSink;

/// Write the default global config, backing up an existing one when `force`.
pub(crate) fn run_init_flow(renderer: &dyn RenderSink, force: bool) -> Result<(), String> {
    let path = default_global_config_path().ok_or_else(|| {
        "unable to resolve default config path for ~/.config/cyberbot/cyberbot.toml".to_string()
    })?;
    let result = initialize_default_global_config(force)
        .map_err(|e| format!("failed to initialize {}: {e}", path.display()))?;
    if let GlobalConfigInitResult::AlreadyInitialized { path } = &result {
        apply_init_result(renderer, result.clone());
        return Err(format!(
            "cyberbot is already initialized at {}. Use `cyberbot init --force` to overwrite.",
            path.display()
        ));
    }
    apply_init_result(renderer, result);
    Ok(())
}

fn apply_init_result(renderer: &dyn RenderSink, result: GlobalConfigInitResult) {
    match result {
        GlobalConfigInitResult::Created { path } => {
            renderer.section("initialized cyberbot config");
            renderer.field("path", &path.display().to_string());
        }
        GlobalConfigInitResult::Overwritten { path, backup_path } => {
            renderer.section("reinitialized cyberbot config");
            renderer.field("path", &path.display().to_string());
            renderer.field("backup", &backup_path.display().to_string());
        }
        GlobalConfigInitResult::AlreadyInitialized { path } => {
            renderer.section("cyberbot config already initialized");
            renderer.field("path", &path.display().to_string());
        }
    }
}
