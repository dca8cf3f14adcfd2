//! CLI argument parsing via clap.

use clap::{Parser, Subcommand};
use cyberbot::build_info;

/// A terminal chat client for a local Ollama model.
#[derive(Debug, Parser)]
#[command(
    name = "cyberbot",
    version = build_info::VERSION,
    after_help = build_info::HELP_BUILD_METADATA
)]
pub struct Args {
    /// Prompt to send. If provided, runs in one-shot mode and exits.
    pub prompt: Option<String>,

    /// Path to config file (default: ./cyberbot.toml or ~/.config/cyberbot/cyberbot.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Override model name.
    #[arg(short = 'm', long = "model")]
    pub model: Option<String>,

    /// Override the Ollama base URL.
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Starting mode: normal, deep-thought, code-master, or debug.
    #[arg(long = "mode")]
    pub mode: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Hide the reasoning block on answers.
    #[arg(long = "no-thoughts")]
    pub no_thoughts: bool,

    /// Show the timing/metadata line on answers.
    #[arg(long = "debug-info")]
    pub debug_info: bool,

    /// Write the transcript as HTML after a one-shot prompt.
    #[arg(long = "html", value_name = "PATH", requires = "prompt")]
    pub html: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the default config to ~/.config/cyberbot/cyberbot.toml.
    Init {
        /// Overwrite an existing config after backing it up.
        #[arg(long)]
        force: bool,
    },
}
