//! One chat request, from submitted text to a stored assistant turn.

use std::time::Duration;

use crate::api::{TokenSource, TokenStream};
use crate::config::Config;
use crate::error::{ApiError, ChatError};
use crate::session::{ChatSession, TurnMetadata};
use crate::stream::{round_secs, EmitPolicy, RequestState, StreamBuffer};
use crate::types::{ChatRequest, SamplingParams};
use crate::ui::render::{AssistantView, RenderSink};

/// Request-shaping settings that stay fixed across turns.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSettings {
    pub model: String,
    pub sampling: SamplingParams,
    /// Stored turns sent ahead of the newest one.
    pub context_messages: usize,
    pub custom_instructions: Option<String>,
    pub emit_policy: EmitPolicy,
}

impl RequestSettings {
    pub fn from_config(config: &Config) -> Self {
        let custom = config.chat.custom_instructions.trim();
        Self {
            model: config.api.model.clone(),
            sampling: config.sampling.clone(),
            context_messages: config.chat.context_messages,
            custom_instructions: (!custom.is_empty()).then(|| custom.to_string()),
            emit_policy: EmitPolicy::default(),
        }
    }
}

/// What happened to a request that got as far as recording the user turn.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOutcome {
    /// `Finalized` or `FailedPartial`.
    pub state: RequestState,
    /// Seconds, two decimals.
    pub elapsed: f64,
    /// Characters in the stored assistant turn.
    pub chars: usize,
}

/// Appended to the response text when the token source fails mid-request.
pub fn failure_annotation(err: &ApiError) -> String {
    format!("\n\n**[ERROR]:** Could not reach the model server.\n\nDetails: {err}")
}

/// Send `input` and record the exchange in `session`.
///
/// Blank input and an unreachable server are reported as errors before
/// anything is recorded. Once the user turn is stored an assistant turn is
/// always stored too, carrying whatever text arrived plus an error
/// annotation if the stream broke.
pub async fn send_message(
    source: &dyn TokenSource,
    settings: &RequestSettings,
    session: &mut ChatSession,
    input: &str,
    sink: &dyn RenderSink,
) -> Result<RequestOutcome, ChatError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ChatError::EmptyInput);
    }
    source
        .probe()
        .await
        .map_err(ChatError::TokenSourceUnavailable)?;

    let mode = session.mode;
    sink.user_message(session.push_user(input));

    let request = ChatRequest {
        model: settings.model.clone(),
        messages: session.request_messages(
            settings.custom_instructions.as_deref(),
            settings.context_messages,
        ),
        stream: true,
        options: settings.sampling.clone(),
    };
    tracing::info!(
        session = session.id(),
        model = %request.model,
        mode = mode.display_name(),
        messages = request.messages.len(),
        "sending chat request"
    );

    let mut buffer = StreamBuffer::new();
    let mut state = RequestState::Idle;
    let failure = match source.open(&request).await {
        Ok(mut stream) => {
            state = state.begin();
            pump(stream.as_mut(), &mut buffer, settings.emit_policy, state, sink).await
        }
        Err(err) => Some(err),
    };
    state = state.end(failure.is_some());
    if let Some(err) = failure {
        tracing::warn!(error = %err, received = buffer.char_count(), "token stream failed");
        buffer.push(&failure_annotation(&err));
    }

    sink.clear_interim();
    let elapsed = round_secs(buffer.elapsed());
    let chars = buffer.char_count();
    let show_thoughts = session.show_thoughts;
    let debug_model = session.show_debug_info.then_some(settings.model.as_str());
    let turn = session.push_assistant(
        buffer.into_text(),
        TurnMetadata {
            elapsed_seconds: elapsed,
            char_count: chars,
            mode,
        },
    );
    sink.assistant_message(&AssistantView::from_turn(turn, show_thoughts, debug_model));
    tracing::debug!(?state, elapsed, chars, "chat request finished");

    Ok(RequestOutcome {
        state,
        elapsed,
        chars,
    })
}

/// Drain `stream` into `buffer`, drawing snapshots as `policy` allows.
/// Returns the error that ended the stream early, if any.
async fn pump(
    stream: &mut dyn TokenStream,
    buffer: &mut StreamBuffer,
    policy: EmitPolicy,
    state: RequestState,
    sink: &dyn RenderSink,
) -> Option<ApiError> {
    while let Some(next) = stream.next_token().await {
        let token = match next {
            Ok(token) => token,
            Err(err) => return Some(err),
        };
        let delta = buffer.push(&token);
        if state.accepts_snapshots() && policy.should_emit(buffer.char_count(), delta) {
            sink.interim(buffer.as_str(), tenths(buffer.elapsed()));
        }
    }
    None
}

fn tenths(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ConversationTurn;
    use crate::types::{ChatMessage, Role};
    use crate::ui::render::SessionHeader;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct Scripted {
        reachable: bool,
        tokens: Vec<Result<String, ApiError>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl Scripted {
        fn new(tokens: Vec<Result<String, ApiError>>) -> Self {
            Self {
                reachable: true,
                tokens,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    struct ScriptedStream(VecDeque<Result<String, ApiError>>);

    #[async_trait]
    impl TokenStream for ScriptedStream {
        async fn next_token(&mut self) -> Option<Result<String, ApiError>> {
            self.0.pop_front()
        }
    }

    fn clone_result(r: &Result<String, ApiError>) -> Result<String, ApiError> {
        match r {
            Ok(t) => Ok(t.clone()),
            Err(e) => Err(ApiError::InvalidResponse(e.to_string())),
        }
    }

    #[async_trait]
    impl TokenSource for Scripted {
        async fn probe(&self) -> Result<(), ApiError> {
            if self.reachable {
                Ok(())
            } else {
                Err(ApiError::Status(503, "down".into()))
            }
        }

        async fn open(&self, request: &ChatRequest) -> Result<Box<dyn TokenStream>, ApiError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(Box::new(ScriptedStream(
                self.tokens.iter().map(clone_result).collect(),
            )))
        }
    }

    #[derive(Default)]
    struct Counting {
        interims: Mutex<Vec<String>>,
        cleared: Mutex<usize>,
        users: Mutex<usize>,
        answers: Mutex<usize>,
    }

    impl RenderSink for Counting {
        fn header(&self, _: &SessionHeader) {}
        fn user_message(&self, _: &ConversationTurn) {
            *self.users.lock().unwrap() += 1;
        }
        fn interim(&self, text: &str, _: f64) {
            self.interims.lock().unwrap().push(text.to_string());
        }
        fn clear_interim(&self) {
            *self.cleared.lock().unwrap() += 1;
        }
        fn assistant_message(&self, _: &AssistantView) {
            *self.answers.lock().unwrap() += 1;
        }
        fn activity(&self, _: &str) {}
        fn warn(&self, _: &str) {}
        fn error(&self, _: &str) {}
        fn section(&self, _: &str) {}
        fn field(&self, _: &str, _: &str) {}
        fn detail(&self, _: &str) {}
    }

    fn settings() -> RequestSettings {
        RequestSettings::from_config(&Config::default())
    }

    fn tokens(parts: &[&str]) -> Vec<Result<String, ApiError>> {
        parts.iter().map(|p| Ok(p.to_string())).collect()
    }

    #[tokio::test]
    async fn blank_input_touches_nothing() {
        let source = Scripted::new(tokens(&["x"]));
        let sink = Counting::default();
        let mut session = ChatSession::new(30);
        let err = send_message(&source, &settings(), &mut session, "  \n\t", &sink)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::EmptyInput));
        assert!(session.turns().is_empty());
        assert!(source.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unreachable_source_stores_no_turn() {
        let mut source = Scripted::new(tokens(&["x"]));
        source.reachable = false;
        let sink = Counting::default();
        let mut session = ChatSession::new(30);
        let err = send_message(&source, &settings(), &mut session, "hi", &sink)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::TokenSourceUnavailable(_)));
        assert!(session.turns().is_empty());
        assert_eq!(session.query_count(), 0);
        assert_eq!(*sink.users.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn request_carries_trimmed_input_and_sampling() {
        let source = Scripted::new(tokens(&["ok"]));
        let sink = Counting::default();
        let mut session = ChatSession::new(30);
        let mut settings = settings();
        settings.custom_instructions = Some("Answer in French.".into());
        send_message(&source, &settings, &mut session, "  hello  ", &sink)
            .await
            .unwrap();

        let requests = source.requests.lock().unwrap();
        let request = &requests[0];
        assert!(request.stream);
        assert_eq!(request.model, settings.model);
        assert_eq!(request.options, settings.sampling);
        assert_eq!(request.messages[0].role, Role::System);
        assert!(request.messages[0].content.ends_with("Answer in French."));
        assert_eq!(request.messages.last(), Some(&ChatMessage::user("hello")));
    }

    #[tokio::test]
    async fn every_early_token_is_drawn_then_cleared() {
        let source = Scripted::new(tokens(&["Hel", "lo ", "**world**"]));
        let sink = Counting::default();
        let mut session = ChatSession::new(30);
        let outcome = send_message(&source, &settings(), &mut session, "greet", &sink)
            .await
            .unwrap();

        assert_eq!(outcome.state, RequestState::Finalized);
        assert_eq!(outcome.chars, 15);
        assert_eq!(
            *sink.interims.lock().unwrap(),
            vec!["Hel", "Hello ", "Hello **world**"]
        );
        assert_eq!(*sink.cleared.lock().unwrap(), 1);
        assert_eq!(*sink.answers.lock().unwrap(), 1);
        assert_eq!(session.turns()[1].content, "Hello **world**");
    }

    #[tokio::test]
    async fn mid_stream_error_is_annotated() {
        let source = Scripted::new(vec![
            Ok("partial ".into()),
            Err(ApiError::InvalidResponse("connection reset".into())),
        ]);
        let sink = Counting::default();
        let mut session = ChatSession::new(30);
        let outcome = send_message(&source, &settings(), &mut session, "q", &sink)
            .await
            .unwrap();

        assert_eq!(outcome.state, RequestState::FailedPartial);
        let stored = &session.turns()[1].content;
        assert!(stored.starts_with("partial "));
        assert!(stored.contains("**[ERROR]:** Could not reach the model server."));
        assert!(stored.contains("connection reset"));
        assert_eq!(outcome.chars, stored.chars().count());
    }

    #[test]
    fn blank_custom_instructions_are_dropped() {
        let mut config = Config::default();
        config.chat.custom_instructions = "   ".into();
        assert_eq!(RequestSettings::from_config(&config).custom_instructions, None);
        config.chat.custom_instructions = " Be terse. ".into();
        assert_eq!(
            RequestSettings::from_config(&config).custom_instructions.as_deref(),
            Some("Be terse.")
        );
    }

    #[test]
    fn tenths_rounds_to_one_decimal() {
        assert_eq!(tenths(Duration::from_millis(1260)), 1.3);
        assert_eq!(tenths(Duration::ZERO), 0.0);
    }
}
