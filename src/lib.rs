//! CyberBot: a terminal chat client for a local Ollama model.
//!
//! The crate streams replies from Ollama's `/api/chat` endpoint, redraws the
//! partial answer while it arrives, and renders the final text through a
//! small markup formatter (fenced code, inline styles, headers, bullets) to
//! either the terminal or a standalone HTML transcript.
//!
//! # Quick start
//!
//! ```no_run
//! use cyberbot::api::OllamaClient;
//! use cyberbot::chat::{send_message, RequestSettings};
//! use cyberbot::config::load_config;
//! use cyberbot::session::ChatSession;
//! use cyberbot::ui::HtmlRenderer;
//!
//! # async fn example() {
//! let config = load_config(None).unwrap().config;
//! let client = OllamaClient::new(&config.api).unwrap();
//! let settings = RequestSettings::from_config(&config);
//! let mut session = ChatSession::new(config.chat.max_history_pairs);
//! let sink = HtmlRenderer::new();
//! send_message(&client, &settings, &mut session, "Hello!", &sink)
//!     .await
//!     .unwrap();
//! println!("{}", sink.document());
//! # }
//! ```

pub mod api;
pub mod build_info;
pub mod chat;
pub mod config;
pub mod error;
pub mod format;
pub mod prompt;
pub mod session;
pub mod stream;
pub mod thought;
pub mod tui;
pub mod types;
pub mod ui;
