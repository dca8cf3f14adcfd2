//! Interactive read-send loop.

use crate::app::commands::{handle_slash_action, SlashOutcome};
use crate::app::startup::{render_offline_notice, session_header};
use cyberbot::api::TokenSource;
use cyberbot::chat::{send_message, RequestOutcome, RequestSettings};
use cyberbot::error::ChatError;
use cyberbot::session::ChatSession;
use cyberbot::tui::{parse_slash_command, SlashCommandAction, TerminalRenderer};
use cyberbot::ui::RenderSink;
use tokio::io::{AsyncBufReadExt, BufReader};

pub(crate) const EMPTY_INPUT_WARNING: &str = "Input is empty: type a question or paste code.";

/// Run the REPL until `/quit` or end of input. Returns the process exit code.
pub(crate) async fn run_repl(
    renderer: &TerminalRenderer,
    source: &dyn TokenSource,
    settings: &RequestSettings,
    session: &mut ChatSession,
) -> i32 {
    let online = source.probe().await.is_ok();
    renderer.header(&session_header(&settings.model, session, online));
    if !online {
        render_offline_notice(renderer, &settings.model);
        eprintln!();
    }
    renderer.empty_state();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        renderer.prompt(session.mode);
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                eprintln!();
                break;
            }
            Err(err) => {
                renderer.error(&format!("failed to read input: {err}"));
                return 1;
            }
        };

        if let Some(action) = parse_slash_command(&line) {
            let cleared = action == SlashCommandAction::Clear;
            if handle_slash_action(renderer, session, &settings.model, action) == SlashOutcome::Quit
            {
                break;
            }
            if cleared {
                renderer.empty_state();
            }
            continue;
        }

        submit(renderer, source, settings, session, &line).await;
    }
    tracing::debug!(
        session = session.id(),
        queries = session.query_count(),
        "leaving interactive mode"
    );
    0
}

/// Send one message and report request-level failures through `renderer`.
///
/// Returns `None` when nothing was recorded.
pub(crate) async fn submit(
    renderer: &dyn RenderSink,
    source: &dyn TokenSource,
    settings: &RequestSettings,
    session: &mut ChatSession,
    input: &str,
) -> Option<RequestOutcome> {
    match send_message(source, settings, session, input, renderer).await {
        Ok(outcome) => Some(outcome),
        Err(ChatError::EmptyInput) => {
            renderer.warn(EMPTY_INPUT_WARNING);
            None
        }
        Err(ChatError::TokenSourceUnavailable(err)) => {
            tracing::warn!(error = %err, "model server unavailable");
            render_offline_notice(renderer, &settings.model);
            renderer.detail(&format!("details: {err}"));
            None
        }
    }
}
