//! Parser for the prompt mini-language
//!
//! ```text
//! [ "|" ] <shell-text> [ "|" | ">" ]
//! ```
//!
//! A leading `|` pipes text from the editor into the command. A trailing `|`
//! replaces the input regions with the output, a trailing `>` opens a new
//! result buffer. Parsing never fails; anything that does not look like a
//! marker is part of the shell text.

use crate::types::{OutputMode, ParsedCommand};
use tracing::debug;

const INPUT_PIPE: char = '|';
const REPLACE_MARKER: char = '|';
const NEW_BUFFER_MARKER: char = '>';

/// Split a raw prompt string into markers and shell text.
pub fn parse_command_line(raw: &str) -> ParsedCommand {
    let mut rest = raw.trim();

    let has_input_pipe = match rest.strip_prefix(INPUT_PIPE) {
        Some(stripped) => {
            rest = stripped.trim_start();
            true
        }
        None => false,
    };

    let output_mode = if let Some(stripped) = rest.strip_suffix(REPLACE_MARKER) {
        rest = stripped.trim_end();
        OutputMode::ReplaceSelection
    } else if let Some(stripped) = rest.strip_suffix(NEW_BUFFER_MARKER) {
        rest = stripped.trim_end();
        OutputMode::NewBuffer
    } else {
        OutputMode::None
    };

    let parsed = ParsedCommand {
        has_input_pipe,
        shell_text: rest.to_string(),
        output_mode,
    };
    debug!("Parsed {:?} into {:?}", raw, parsed);
    parsed
}

impl std::str::FromStr for ParsedCommand {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_command_line(s))
    }
}
