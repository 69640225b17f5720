use std::io;
use std::path::PathBuf;

/// Errors that can occur while running a pipeshell command
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed marker combination or a marker that needs a text surface
    #[error("{0}")]
    UserInput(String),

    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("{}", format_exit_failure(*exit_code, stdout, stderr))]
    ProcessExit {
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("I/O error while talking to `{command}`: {source}")]
    Transport {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid command pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to stage command input: {0}")]
    Staging(#[source] io::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// True for errors caused by what the user typed rather than by the process
    pub fn is_user_input(&self) -> bool {
        matches!(self, Error::UserInput(_))
    }
}

/// Render a failed process run for a human reader.
pub fn format_exit_failure(exit_code: i32, stdout: &str, stderr: &str) -> String {
    let mut message = format!("Command exited with status {exit_code}");
    if !stdout.trim().is_empty() {
        message.push_str("\n\nstdout:\n");
        message.push_str(stdout.trim_end());
    }
    if !stderr.trim().is_empty() {
        message.push_str("\n\nstderr:\n");
        message.push_str(stderr.trim_end());
    }
    message
}

/// Result type alias for pipeshell operations
pub type Result<T> = std::result::Result<T, Error>;
