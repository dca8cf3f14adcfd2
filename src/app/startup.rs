//! Startup header and offline notice helpers.

use cyberbot::build_info;
use cyberbot::session::ChatSession;
use cyberbot::ui::render::{RenderSink, SessionHeader};

/// Collect the facts shown in the startup header.
pub(crate) fn session_header(model: &str, session: &ChatSession, online: bool) -> SessionHeader {
    SessionHeader {
        version: build_info::startup_metadata_line(),
        model: model.to_string(),
        mode: session.mode.display_name().to_string(),
        session_id: session.id().to_string(),
        online,
    }
}

/// Lines explaining how to bring the model server up.
pub(crate) fn offline_notice(model: &str) -> [String; 3] {
    [
        "CyberBot Offline: Ollama is not running.".to_string(),
        "Start it: `ollama serve`".to_string(),
        format!("Pull model: `ollama pull {model}`"),
    ]
}

/// Render the offline notice as an error plus detail lines.
pub(crate) fn render_offline_notice(renderer: &dyn RenderSink, model: &str) {
    let [headline, start, pull] = offline_notice(model);
    renderer.error(&headline);
    renderer.detail(&start);
    renderer.detail(&pull);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyberbot::prompt::Mode;

    #[test]
    fn header_reflects_session() {
        let session = ChatSession::new(30).with_mode(Mode::DeepThought);
        let header = session_header("gemma", &session, false);
        assert_eq!(header.mode, "Deep Thought");
        assert_eq!(header.session_id, session.id());
        assert_eq!(header.model, "gemma");
        assert!(!header.online);
        assert!(header.version.starts_with('v'));
    }

    #[test]
    fn offline_notice_names_the_model() {
        let [headline, start, pull] = offline_notice("codegemma:2b");
        assert!(headline.contains("Ollama is not running"));
        assert!(start.contains("ollama serve"));
        assert_eq!(pull, "Pull model: `ollama pull codegemma:2b`");
    }
}
