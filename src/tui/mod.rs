//! Terminal user-interface building blocks.
//!
//! This module hosts slash-command parsing and the terminal renderer
//! primitives. Layout math, syntax highlighting, and styling constants live
//! in separate files so the renderer stays focused on writing rows.

pub mod commands;
mod highlight;
pub mod renderer;
pub mod settings;
pub mod text;

pub use commands::{
    matching_slash_commands, parse_slash_command, SlashCommand, SlashCommandAction, SLASH_COMMANDS,
};
pub use renderer::TerminalRenderer;
