//! Slash-command metadata and parsing.

const MAX_SUGGESTIONS: usize = 3;

/// Static slash command metadata used by parsing, `/help`, and suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlashCommand {
    pub name: &'static str,
    pub description: &'static str,
}

/// Built-in slash commands for interactive mode.
pub const SLASH_COMMANDS: [SlashCommand; 10] = [
    SlashCommand {
        name: "/help",
        description: "List available slash commands.",
    },
    SlashCommand {
        name: "/clear",
        description: "Forget the conversation and start a new session.",
    },
    SlashCommand {
        name: "/mode",
        description: "Show or switch mode: /mode [normal|deep-thought|code-master|debug].",
    },
    SlashCommand {
        name: "/thoughts",
        description: "Toggle the reasoning block on answers.",
    },
    SlashCommand {
        name: "/debug",
        description: "Toggle the timing/metadata line on answers.",
    },
    SlashCommand {
        name: "/stats",
        description: "Show session statistics.",
    },
    SlashCommand {
        name: "/history",
        description: "Redraw the stored conversation.",
    },
    SlashCommand {
        name: "/export",
        description: "Write the conversation as HTML: /export <path>.",
    },
    SlashCommand {
        name: "/quit",
        description: "Exit interactive mode.",
    },
    SlashCommand {
        name: "/exit",
        description: "Exit interactive mode.",
    },
];

/// Parsed slash command actions consumed by the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommandAction {
    Quit,
    Help,
    Clear,
    /// Everything after `/mode`, so `/mode deep thought` keeps both words.
    Mode(Option<String>),
    Thoughts,
    Debug,
    Stats,
    History,
    Export(Option<String>),
    Unknown(String),
}

/// Parse a slash command from user input.
///
/// Returns `None` if the input is not a slash command.
pub fn parse_slash_command(input: &str) -> Option<SlashCommandAction> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (token, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim()),
        None => (trimmed, ""),
    };
    let argument = (!rest.is_empty()).then(|| rest.to_string());

    let action = match token.to_ascii_lowercase().as_str() {
        "/" | "/help" => SlashCommandAction::Help,
        "/quit" | "/exit" => SlashCommandAction::Quit,
        "/clear" => SlashCommandAction::Clear,
        "/mode" => SlashCommandAction::Mode(argument),
        "/thoughts" => SlashCommandAction::Thoughts,
        "/debug" => SlashCommandAction::Debug,
        "/stats" => SlashCommandAction::Stats,
        "/history" => SlashCommandAction::History,
        "/export" => SlashCommandAction::Export(argument),
        other => SlashCommandAction::Unknown(other.to_string()),
    };

    Some(action)
}

/// Commands whose name starts with the first word of `input`.
pub fn matching_slash_commands(input: &str) -> Vec<SlashCommand> {
    if !input.starts_with('/') {
        return Vec::new();
    }

    let prefix = input
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();

    SLASH_COMMANDS
        .iter()
        .copied()
        .filter(|cmd| cmd.name.starts_with(prefix.as_str()))
        .take(MAX_SUGGESTIONS)
        .collect()
}
