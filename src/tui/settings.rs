//! Centralized, hardcoded UI settings for the terminal interface.
//!
//! This is the single place to tweak labels, glyphs, colors, and
//! indentation.

use crossterm::style::Color;

// ---------------------------------------------------------------------------
// Layout / indentation
// ---------------------------------------------------------------------------

pub const INDENT_1: &str = "  ";
pub const BLOCK_FALLBACK_COLUMNS: usize = 100;
pub const BLOCK_RIGHT_MARGIN: usize = 2;

// ---------------------------------------------------------------------------
// Prompt / status strings
// ---------------------------------------------------------------------------

pub const PROMPT_SYMBOL: &str = "›";
pub const PROMPT_PLAIN: &str = "> ";
pub const INTERIM_CURSOR: &str = "▌";
pub const CLEAR_LINE: &str = "\r\x1b[2K";

// ---------------------------------------------------------------------------
// Sections / labels
// ---------------------------------------------------------------------------

pub const LABEL_WARNING: &str = "warning:";
pub const LABEL_ERROR: &str = "error:";
pub const LABEL_ONLINE: &str = "● ONLINE";
pub const LABEL_OFFLINE: &str = "○ OFFLINE";
pub const CODE_TAG: &str = "CYBERBOT GENERATED";

pub const GLYPH_SECTION_BULLET: &str = "•";
pub const GLYPH_BULLET: &str = "▸";
pub const FRAME_TOP: &str = "┌─";
pub const FRAME_SIDE: &str = "│ ";
pub const FRAME_BOTTOM: &str = "└─";

pub const EMPTY_STATE_HINT: &str = "JACK INTO THE NEURAL GRID — ASK ANYTHING";
pub const EXAMPLE_PROMPTS: [&str; 6] = [
    "Binary search in Python",
    "Explain async/await",
    "Design a REST API",
    "Debug my code",
    "Quicksort explained",
    "Linked list implementation",
];

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

pub const COLOR_PROMPT_SYMBOL: Color = Color::Magenta;
pub const COLOR_PROMPT_BADGE: Color = Color::DarkGrey;

pub const COLOR_USER_LABEL: Color = Color::Magenta;
pub const COLOR_ASSISTANT_LABEL: Color = Color::Cyan;
pub const COLOR_TIMESTAMP: Color = Color::DarkGrey;
pub const COLOR_MODEL_NAME: Color = Color::Yellow;
pub const COLOR_ONLINE: Color = Color::Green;
pub const COLOR_OFFLINE: Color = Color::Red;

pub const COLOR_INTERIM_STATUS: Color = Color::Cyan;
pub const COLOR_INTERIM_TEXT: Color = Color::DarkGrey;

pub const COLOR_ACTIVITY_TEXT: Color = Color::DarkGrey;
pub const COLOR_WARNING: Color = Color::Yellow;
pub const COLOR_ERROR: Color = Color::Red;

pub const COLOR_SECTION_BULLET: Color = Color::DarkGrey;
pub const COLOR_SECTION_TITLE: Color = Color::Cyan;
pub const COLOR_FIELD_KEY: Color = Color::DarkGrey;
pub const COLOR_FIELD_VALUE: Color = Color::White;

pub const COLOR_CODE_BG: Color = Color::Rgb { r: 4, g: 8, b: 15 };
pub const COLOR_THOUGHT_BG: Color = Color::Rgb {
    r: 24,
    g: 18,
    b: 38,
};

pub const RGB_TEXT: (u8, u8, u8) = (232, 246, 255);
pub const RGB_HEADING: (u8, u8, u8) = (255, 212, 71);
pub const RGB_BULLET: (u8, u8, u8) = (0, 232, 255);
pub const RGB_BOLD: (u8, u8, u8) = (255, 212, 71);
pub const RGB_ITALIC: (u8, u8, u8) = (0, 232, 255);
pub const RGB_INLINE_CODE: (u8, u8, u8) = (57, 255, 20);
pub const RGB_CODE_TEXT: (u8, u8, u8) = (168, 255, 168);
pub const RGB_CODE_FRAME: (u8, u8, u8) = (57, 160, 40);
pub const RGB_THOUGHT_HEADER: (u8, u8, u8) = (179, 136, 255);
pub const RGB_THOUGHT_TEXT: (u8, u8, u8) = (160, 170, 185);
pub const RGB_DEBUG: (u8, u8, u8) = (120, 130, 140);
