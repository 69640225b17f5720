use serde::Serialize;
use std::fmt;

/// Where the output of a command should go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// No trailing marker: the host job runner streams the output
    #[default]
    None,
    /// Trailing `|`: overwrite each input region with the output
    ReplaceSelection,
    /// Trailing `>`: open a new result buffer with the output
    NewBuffer,
}

impl OutputMode {
    /// True when the output has to be captured before a sink can use it
    pub fn captures_output(self) -> bool {
        !matches!(self, OutputMode::None)
    }

    pub fn marker(self) -> Option<char> {
        match self {
            OutputMode::None => None,
            OutputMode::ReplaceSelection => Some('|'),
            OutputMode::NewBuffer => Some('>'),
        }
    }
}

/// A raw prompt string split into its markers and the shell text between them
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ParsedCommand {
    pub has_input_pipe: bool,
    pub shell_text: String,
    pub output_mode: OutputMode,
}

impl ParsedCommand {
    pub fn new(shell_text: impl Into<String>) -> Self {
        Self {
            has_input_pipe: false,
            shell_text: shell_text.into(),
            output_mode: OutputMode::None,
        }
    }

    pub fn with_input_pipe(mut self) -> Self {
        self.has_input_pipe = true;
        self
    }

    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }
}

impl fmt::Display for ParsedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_input_pipe {
            write!(f, "| ")?;
        }
        write!(f, "{}", self.shell_text)?;
        if let Some(marker) = self.output_mode.marker() {
            write!(f, " {marker}")?;
        }
        Ok(())
    }
}
