//! Slash-command dispatch for the interactive REPL.

use cyberbot::prompt::Mode;
use cyberbot::session::ChatSession;
use cyberbot::stream::format_secs;
use cyberbot::tui::{matching_slash_commands, SlashCommandAction, SLASH_COMMANDS};
use cyberbot::ui::{export_transcript, replay_history, RenderSink};
use std::path::Path;

/// Whether the REPL keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlashOutcome {
    Continue,
    Quit,
}

/// Apply one parsed slash command to the session.
pub(crate) fn handle_slash_action(
    renderer: &dyn RenderSink,
    session: &mut ChatSession,
    model: &str,
    action: SlashCommandAction,
) -> SlashOutcome {
    match action {
        SlashCommandAction::Quit => return SlashOutcome::Quit,
        SlashCommandAction::Help => {
            renderer.section("commands");
            for command in SLASH_COMMANDS {
                renderer.field(command.name, command.description);
            }
        }
        SlashCommandAction::Clear => {
            session.clear();
            renderer.activity(&format!("memory wiped, new session {}", session.id()));
        }
        SlashCommandAction::Mode(None) => render_modes(renderer, session.mode),
        SlashCommandAction::Mode(Some(name)) => match name.parse::<Mode>() {
            Ok(mode) => {
                session.mode = mode;
                renderer.activity(&format!("mode set to {}", mode.display_name()));
            }
            Err(msg) => renderer.warn(&msg),
        },
        SlashCommandAction::Thoughts => {
            session.show_thoughts = !session.show_thoughts;
            renderer.activity(&toggle_message("thought blocks", session.show_thoughts));
        }
        SlashCommandAction::Debug => {
            session.show_debug_info = !session.show_debug_info;
            renderer.activity(&toggle_message("debug info", session.show_debug_info));
        }
        SlashCommandAction::Stats => {
            renderer.section("session stats");
            for (key, value) in stats_fields(session, model) {
                renderer.field(key, &value);
            }
        }
        SlashCommandAction::History => {
            if session.turns().is_empty() {
                renderer.activity("no messages yet");
            } else {
                replay_history(session, renderer, model);
            }
        }
        SlashCommandAction::Export(None) => renderer.warn("Usage: /export <path>"),
        SlashCommandAction::Export(Some(path)) => {
            match export_transcript(session, model, Path::new(&path)) {
                Ok(()) => renderer.activity(&format!(
                    "wrote {} messages to {path}",
                    session.turns().len()
                )),
                Err(err) => renderer.error(&format!("failed to write {path}: {err}")),
            }
        }
        SlashCommandAction::Unknown(name) => {
            renderer.warn(&format!("unknown command {name}. Type /help for the list."));
            let suggestions = matching_slash_commands(&name);
            if !suggestions.is_empty() {
                let names = suggestions
                    .iter()
                    .map(|c| c.name)
                    .collect::<Vec<_>>()
                    .join(", ");
                renderer.detail(&format!("did you mean: {names}"));
            }
        }
    }
    SlashOutcome::Continue
}

fn render_modes(renderer: &dyn RenderSink, active: Mode) {
    renderer.section("modes");
    for mode in Mode::ALL {
        let marker = if mode == active { "*" } else { " " };
        renderer.field(
            &format!("{marker} {}", mode.display_name()),
            mode.summary(),
        );
    }
}

fn toggle_message(what: &str, on: bool) -> String {
    format!("{what} {}", if on { "shown" } else { "hidden" })
}

/// Key/value rows printed by `/stats`.
pub(crate) fn stats_fields(session: &ChatSession, model: &str) -> Vec<(&'static str, String)> {
    vec![
        ("session", session.id().to_string()),
        ("queries", session.query_count().to_string()),
        ("messages", session.turns().len().to_string()),
        ("memory", format!("{}%", session.memory_percent())),
        (
            "last response",
            session
                .last_elapsed()
                .map(|secs| format!("{}s", format_secs(secs)))
                .unwrap_or_else(|| "n/a".to_string()),
        ),
        ("mode", session.mode.display_name().to_string()),
        ("model", model.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyberbot::session::{ConversationTurn, TurnMetadata};
    use cyberbot::ui::{AssistantView, SessionHeader};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording(Mutex<Vec<String>>);

    impl Recording {
        fn lines(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }

        fn push(&self, line: String) {
            self.0.lock().unwrap().push(line);
        }
    }

    impl RenderSink for Recording {
        fn header(&self, _: &SessionHeader) {}
        fn user_message(&self, turn: &ConversationTurn) {
            self.push(format!("user:{}", turn.content));
        }
        fn interim(&self, _: &str, _: f64) {}
        fn clear_interim(&self) {}
        fn assistant_message(&self, view: &AssistantView) {
            self.push(format!("assistant:{}", view.timestamp));
        }
        fn activity(&self, text: &str) {
            self.push(format!("activity:{text}"));
        }
        fn warn(&self, msg: &str) {
            self.push(format!("warn:{msg}"));
        }
        fn error(&self, msg: &str) {
            self.push(format!("error:{msg}"));
        }
        fn section(&self, title: &str) {
            self.push(format!("section:{title}"));
        }
        fn field(&self, key: &str, value: &str) {
            self.push(format!("field:{key}={value}"));
        }
        fn detail(&self, text: &str) {
            self.push(format!("detail:{text}"));
        }
    }

    fn run(session: &mut ChatSession, action: SlashCommandAction) -> (SlashOutcome, Vec<String>) {
        let sink = Recording::default();
        let outcome = handle_slash_action(&sink, session, "gemma", action);
        (outcome, sink.lines())
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut session = ChatSession::new(30);
        assert_eq!(run(&mut session, SlashCommandAction::Quit).0, SlashOutcome::Quit);
        assert_eq!(run(&mut session, SlashCommandAction::Help).0, SlashOutcome::Continue);
    }

    #[test]
    fn mode_switch_accepts_names_and_rejects_garbage() {
        let mut session = ChatSession::new(30);
        run(&mut session, SlashCommandAction::Mode(Some("deep thought".into())));
        assert_eq!(session.mode, Mode::DeepThought);

        let (_, lines) = run(&mut session, SlashCommandAction::Mode(Some("turbo".into())));
        assert_eq!(session.mode, Mode::DeepThought);
        assert!(lines[0].starts_with("warn:"), "{lines:?}");
    }

    #[test]
    fn mode_listing_marks_the_active_mode() {
        let mut session = ChatSession::new(30).with_mode(Mode::Debug);
        let (_, lines) = run(&mut session, SlashCommandAction::Mode(None));
        assert_eq!(lines.len(), 1 + Mode::ALL.len());
        assert!(lines.iter().any(|l| l.starts_with("field:* Debug=")), "{lines:?}");
    }

    #[test]
    fn toggles_flip_session_flags() {
        let mut session = ChatSession::new(30);
        let (_, lines) = run(&mut session, SlashCommandAction::Thoughts);
        assert!(!session.show_thoughts);
        assert_eq!(lines, vec!["activity:thought blocks hidden"]);
        run(&mut session, SlashCommandAction::Debug);
        assert!(session.show_debug_info);
    }

    #[test]
    fn clear_starts_a_new_session() {
        let mut session = ChatSession::new(30);
        session.push_user("hi");
        run(&mut session, SlashCommandAction::Clear);
        assert!(session.turns().is_empty());
        assert_eq!(session.query_count(), 0);
    }

    #[test]
    fn stats_report_counts_and_memory() {
        let mut session = ChatSession::new(2);
        session.push_user("q");
        session.push_assistant(
            "a",
            TurnMetadata {
                elapsed_seconds: 1.25,
                char_count: 1,
                mode: Mode::Normal,
            },
        );
        let fields = stats_fields(&session, "gemma");
        let get = |key: &str| {
            fields
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("queries"), "1");
        assert_eq!(get("messages"), "2");
        assert_eq!(get("memory"), "100%");
        assert_eq!(get("last response"), "1.25s");
        assert_eq!(get("mode"), "Normal");
        assert_eq!(get("model"), "gemma");
        assert_eq!(get("session"), session.id());
    }

    #[test]
    fn history_replays_turns_in_order() {
        let mut session = ChatSession::new(30);
        let (_, lines) = run(&mut session, SlashCommandAction::History);
        assert_eq!(lines, vec!["activity:no messages yet"]);

        session.push_user("first");
        let (_, lines) = run(&mut session, SlashCommandAction::History);
        assert_eq!(lines, vec!["user:first"]);
    }

    #[test]
    fn unknown_command_suggests_close_matches() {
        let mut session = ChatSession::new(30);
        let (_, lines) = run(&mut session, SlashCommandAction::Unknown("/ex".into()));
        assert!(lines[0].starts_with("warn:unknown command /ex"));
        assert_eq!(lines[1], "detail:did you mean: /export, /exit");
    }

    #[test]
    fn export_without_path_warns() {
        let mut session = ChatSession::new(30);
        let (_, lines) = run(&mut session, SlashCommandAction::Export(None));
        assert_eq!(lines, vec!["warn:Usage: /export <path>"]);
    }
}
