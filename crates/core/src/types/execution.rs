use std::fmt;
use std::path::PathBuf;

use crate::config::ExecOptions;

/// How a command reaches the operating system
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    /// Handed to the platform shell, so pipes and redirects inside it work
    Shell(String),
    /// Executed directly; the first element is the program
    Argv(Vec<String>),
}

impl CommandLine {
    pub fn is_shell(&self) -> bool {
        matches!(self, CommandLine::Shell(_))
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandLine::Shell(command) => write!(f, "{command}"),
            CommandLine::Argv(args) => {
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    if arg.contains(' ') {
                        write!(f, "'{arg}'")?;
                    } else {
                        write!(f, "{arg}")?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Everything the executor needs for one process run
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub working_dir: PathBuf,
    pub command: CommandLine,
    /// Written to stdin before it is closed (sync path only)
    pub input: Option<String>,
    /// Block until the process exits and capture its output
    pub wait: bool,
    pub options: ExecOptions,
}

impl ExecutionRequest {
    /// A shell-interpreted request that waits for the process
    pub fn shell(working_dir: impl Into<PathBuf>, command: impl Into<String>) -> Self {
        Self {
            working_dir: working_dir.into(),
            command: CommandLine::Shell(command.into()),
            input: None,
            wait: true,
            options: ExecOptions::default(),
        }
    }

    /// A direct-exec request that waits for the process
    pub fn argv(working_dir: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            working_dir: working_dir.into(),
            command: CommandLine::Argv(args),
            input: None,
            wait: true,
            options: ExecOptions::default(),
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn detached(mut self) -> Self {
        self.wait = false;
        self
    }

    pub fn with_options(mut self, options: ExecOptions) -> Self {
        self.options = options;
        self
    }
}

/// Outcome of a process run that was waited on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    Success {
        stdout: String,
    },
    Failure {
        exit_code: i32,
        stdout: String,
        stderr: String,
    },
}

impl ExecutionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success { .. })
    }

    pub fn stdout(&self) -> &str {
        match self {
            ExecutionResult::Success { stdout } | ExecutionResult::Failure { stdout, .. } => {
                stdout
            }
        }
    }

    /// Turn a failure into the error reported to the user
    pub fn into_result(self) -> crate::Result<String> {
        match self {
            ExecutionResult::Success { stdout } => Ok(stdout),
            ExecutionResult::Failure {
                exit_code,
                stdout,
                stderr,
            } => Err(crate::Error::ProcessExit {
                exit_code,
                stdout,
                stderr,
            }),
        }
    }
}
