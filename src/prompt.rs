//! Response modes and system prompt templating.
//!
//! The shared prompt text lives in one template file; each [`Mode`] contributes
//! an instruction block that is spliced in from a single code path.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

const SYSTEM_PROMPT_TEMPLATE: &str = include_str!("templates/system_prompt.template");
const DEEP_THOUGHT_BLOCK: &str = include_str!("templates/mode_deep_thought.txt");
const CODE_MASTER_BLOCK: &str = include_str!("templates/mode_code_master.txt");
const DEBUG_BLOCK: &str = include_str!("templates/mode_debug.txt");

/// Selects the system-prompt template prefixed to every request.
///
/// Exactly one mode is active per session. Switching modes only affects the
/// next request; stored turns keep the content they were produced with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Mode {
    #[default]
    Normal,
    DeepThought,
    CodeMaster,
    Debug,
}

impl Mode {
    /// All modes in menu order.
    pub const ALL: [Mode; 4] = [
        Mode::Normal,
        Mode::DeepThought,
        Mode::CodeMaster,
        Mode::Debug,
    ];

    /// Human-readable mode name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::DeepThought => "Deep Thought",
            Self::CodeMaster => "Code Master",
            Self::Debug => "Debug",
        }
    }

    /// Uppercase badge shown next to the input prompt.
    pub fn badge(self) -> &'static str {
        match self {
            Self::Normal => "STANDARD",
            Self::DeepThought => "DEEP THOUGHT",
            Self::CodeMaster => "CODE MASTER",
            Self::Debug => "DEBUG MODE",
        }
    }

    /// One-line description for `/mode` listings.
    pub fn summary(self) -> &'static str {
        match self {
            Self::Normal => "general Q&A",
            Self::DeepThought => "structured reasoning",
            Self::CodeMaster => "full implementations",
            Self::Debug => "root cause analysis & fix",
        }
    }

    fn instructions(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::DeepThought => DEEP_THOUGHT_BLOCK,
            Self::CodeMaster => CODE_MASTER_BLOCK,
            Self::Debug => DEBUG_BLOCK,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Mode {
    type Err = String;

    /// Accepts `deep-thought`, `Deep Thought`, `deep_thought`, `deepthought`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "normal" | "standard" => Ok(Self::Normal),
            "deepthought" | "deep" => Ok(Self::DeepThought),
            "codemaster" | "code" => Ok(Self::CodeMaster),
            "debug" => Ok(Self::Debug),
            _ => Err(format!(
                "unknown mode `{}` (expected one of: normal, deep-thought, code-master, debug)",
                s.trim()
            )),
        }
    }
}

impl TryFrom<String> for Mode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Render the system prompt for `mode`, with optional operator instructions.
pub fn render_system_prompt(mode: Mode, custom_instructions: Option<&str>) -> String {
    let mut vars = BTreeMap::<&str, String>::new();
    vars.insert("MODE_INSTRUCTIONS", mode.instructions().trim().to_string());
    vars.insert(
        "CUSTOM_INSTRUCTIONS_BLOCK",
        render_custom_instructions(custom_instructions),
    );

    normalize_blank_lines(&render_template(SYSTEM_PROMPT_TEMPLATE, &vars))
}

fn render_template(template: &str, vars: &BTreeMap<&str, String>) -> String {
    let mut rendered = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("{{{{{key}}}}}");
        rendered = rendered.replace(&placeholder, value);
    }
    rendered
}

fn render_custom_instructions(custom: Option<&str>) -> String {
    let Some(custom) = custom.map(str::trim).filter(|s| !s.is_empty()) else {
        return String::new();
    };
    format!("Additional operator instructions:\n{custom}")
}

fn normalize_blank_lines(text: &str) -> String {
    let mut out = String::new();
    let mut previous_blank = false;

    for line in text.lines() {
        let is_blank = line.trim().is_empty();
        if is_blank && previous_blank {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(line.trim_end());
        previous_blank = is_blank;
    }

    out.trim().to_string()
}
