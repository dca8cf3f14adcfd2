//! One-shot prompt mode.

use crate::app::repl_loop::submit;
use cyberbot::api::TokenSource;
use cyberbot::chat::RequestSettings;
use cyberbot::session::ChatSession;
use cyberbot::stream::RequestState;
use cyberbot::ui::{export_transcript, RenderSink};
use std::path::Path;

/// Send `prompt`, optionally export the exchange, and return the exit code.
///
/// A reply cut short by a transport failure still prints and exports, but
/// exits non-zero.
pub(crate) async fn run_exec_mode(
    renderer: &dyn RenderSink,
    source: &dyn TokenSource,
    settings: &RequestSettings,
    session: &mut ChatSession,
    prompt: &str,
    html: Option<&str>,
) -> i32 {
    let Some(outcome) = submit(renderer, source, settings, session, prompt).await else {
        return 1;
    };

    if let Some(path) = html {
        if let Err(err) = export_transcript(session, &settings.model, Path::new(path)) {
            renderer.error(&format!("failed to write {path}: {err}"));
            return 1;
        }
        renderer.activity(&format!("transcript written to {path}"));
    }

    match outcome.state {
        RequestState::FailedPartial => 1,
        _ => 0,
    }
}
