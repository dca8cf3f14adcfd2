//! Standalone HTML transcript built through the same `RenderSink` contract
//! as the terminal.

use std::io;
use std::path::Path;
use std::sync::Mutex;

use crate::format::{escape_html, segments_to_html};
use crate::session::{ChatSession, ConversationTurn};
use crate::ui::render::{
    replay_history, AssistantView, RenderSink, SessionHeader, ASSISTANT_LABEL, USER_LABEL,
};

const STYLESHEET: &str = include_str!("../templates/transcript.css");

/// Collects rendered markup in memory. Interim snapshots are not recorded.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    body: Mutex<String>,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup appended so far, without the page wrapper.
    pub fn body(&self) -> String {
        self.lock().clone()
    }

    /// Full standalone page.
    pub fn document(&self) -> String {
        format!(
            concat!(
                "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n",
                "<title>CyberBot transcript</title>\n<style>\n{}</style>\n</head>\n",
                "<body>\n{}</body>\n</html>\n"
            ),
            STYLESHEET,
            self.body()
        )
    }

    /// Write [`Self::document`] to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.document())?;
        tracing::info!(path = %path.display(), "wrote html transcript");
        Ok(())
    }

    fn push(&self, markup: String) {
        let mut body = self.lock();
        body.push_str(&markup);
        body.push('\n');
    }

    fn note(&self, class: &str, text: &str) {
        self.push(format!(
            r#"<div class="{class}">{}</div>"#,
            escape_html(text)
        ));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, String> {
        // Poisoning leaves the text intact.
        self.body.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Write every stored turn of `session` to `path` as a standalone page.
pub fn export_transcript(session: &ChatSession, model: &str, path: &Path) -> io::Result<()> {
    let html = HtmlRenderer::new();
    replay_history(session, &html, model);
    html.write_to(path)
}

impl RenderSink for HtmlRenderer {
    fn header(&self, header: &SessionHeader) {
        let status = if header.online { "ONLINE" } else { "OFFLINE" };
        self.push(format!(
            concat!(
                r#"<div class="hdr">{} {}<br>"#,
                r#"<span class="fld">MODEL {}</span>"#,
                r#"<span class="fld">MODE {}</span>"#,
                r#"<span class="fld">SESSION {}</span>"#,
                r#"<span class="fld">{}</span></div>"#
            ),
            ASSISTANT_LABEL,
            escape_html(&header.version),
            escape_html(&header.model),
            escape_html(&header.mode),
            escape_html(&header.session_id),
            status
        ));
    }

    fn user_message(&self, turn: &ConversationTurn) {
        self.push(format!(
            concat!(
                r#"<div class="mwrap"><div class="mu"><span class="lu">{}</span>"#,
                r#"<div class="mbody">{}</div><div class="mts">{}</div></div></div>"#
            ),
            USER_LABEL,
            escape_html(&turn.content),
            escape_html(&turn.timestamp)
        ));
    }

    fn interim(&self, _text: &str, _elapsed_secs: f64) {}

    fn clear_interim(&self) {}

    fn assistant_message(&self, view: &AssistantView) {
        let thought = view
            .thought
            .as_ref()
            .map(|t| t.to_html())
            .unwrap_or_default();
        let debug = view
            .debug
            .as_ref()
            .map(|d| format!(r#"<div class="dinfo">{}</div>"#, escape_html(d)))
            .unwrap_or_default();
        self.push(format!(
            concat!(
                r#"<div class="mwrap"><div class="mai"><span class="lai">{}</span>"#,
                r#"{}<div class="mbody">{}</div>{}<div class="mts">{}</div></div></div>"#
            ),
            ASSISTANT_LABEL,
            thought,
            segments_to_html(&view.segments),
            debug,
            escape_html(&view.timestamp)
        ));
    }

    fn activity(&self, text: &str) {
        self.note("note", text);
    }

    fn warn(&self, msg: &str) {
        self.note("note warn", msg);
    }

    fn error(&self, msg: &str) {
        self.note("note err", msg);
    }

    fn section(&self, title: &str) {
        self.push(format!(r#"<span class="shdr">{}</span>"#, escape_html(title)));
    }

    fn field(&self, key: &str, value: &str) {
        self.note("note", &format!("{key}: {value}"));
    }

    fn detail(&self, text: &str) {
        self.note("note", text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::Mode;
    use crate::session::TurnMetadata;

    fn meta() -> TurnMetadata {
        TurnMetadata {
            elapsed_seconds: 0.82,
            char_count: 20,
            mode: Mode::Normal,
        }
    }

    #[test]
    fn user_content_is_escaped() {
        let html = HtmlRenderer::new();
        html.user_message(&ConversationTurn::user("is a<b?", "09:15:00"));
        let body = html.body();
        assert!(body.contains(r#"<span class="lu">⬡ YOU</span>"#), "{body}");
        assert!(body.contains("is a&lt;b?"));
        assert!(body.contains(r#"<div class="mts">09:15:00</div>"#));
    }

    #[test]
    fn assistant_turn_orders_thought_body_debug_timestamp() {
        let turn = ConversationTurn::assistant(
            "[ANALYSIS]\nlook\n\n**yes**",
            "09:15:02  [0.82s]",
            meta(),
        );
        let html = HtmlRenderer::new();
        html.assistant_message(&AssistantView::from_turn(&turn, true, Some("m")));
        let body = html.body();

        let thought = body.find(r#"class="thgt""#).unwrap();
        let main = body.find("<strong>yes</strong>").unwrap();
        let debug = body.find(r#"class="dinfo""#).unwrap();
        let ts = body.find("09:15:02  [0.82s]").unwrap();
        assert!(thought < main && main < debug && debug < ts, "{body}");
    }

    #[test]
    fn interim_snapshots_are_not_recorded() {
        let html = HtmlRenderer::new();
        html.interim("partial", 0.3);
        html.clear_interim();
        assert!(html.body().is_empty());
    }

    #[test]
    fn transcript_replays_session_and_writes_page() {
        let mut session = ChatSession::new(30);
        session.push_user("hello");
        session.push_assistant("hi **there**", meta());

        let dir = std::env::temp_dir().join(format!(
            "cyberbot-html-{}-{}",
            std::process::id(),
            session.id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("t.html");
        export_transcript(&session, "m", &path).unwrap();

        let page = std::fs::read_to_string(&path).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(".cbody"));
        assert!(page.contains("hello"));
        assert!(page.contains("hi <strong>there</strong>"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
