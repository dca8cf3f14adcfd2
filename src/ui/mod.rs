//! Output-facing UI facade.
//!
//! Orchestration code depends on the [`render::RenderSink`] contract here;
//! the terminal implementation lives in `crate::tui` and the HTML transcript
//! in [`html`].

pub mod html;
pub mod render;

pub use html::{export_transcript, HtmlRenderer};
pub use render::{replay_history, AssistantView, RenderSink, SessionHeader, TerminalRenderer};
