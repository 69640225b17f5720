//! pipeshell - Run shell commands from an editor, piping text in and out
//!
//! This crate provides functionality to:
//! - Parse prompt entries like `| sort |` into a command and its pipe markers
//! - Pick the working directory from the open project and active file
//! - Wrap commands with per-pattern prefixes, suffixes and environment
//! - Run commands synchronously with captured output, or hand them to a job runner
pub mod config;
pub mod directory;
pub mod error;
pub mod executor;
pub mod history;
pub mod host;
pub mod orchestrator;
pub mod parser;
pub mod staging;
pub mod terminal;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use config::{CommandConfig, CommandDefaults, ConfigLoader, ExecOptions, Settings};
pub use directory::DirectoryResolver;
pub use executor::{ProcessExecutor, Shell, SystemExecutor};
pub use history::CommandHistory;
pub use host::{EditorSurface, JobRunner, JobSpec, Region};
pub use orchestrator::{CommandOrchestrator, Outcome};
pub use parser::parse_command_line;
pub use staging::StagingArea;
pub use terminal::TerminalLauncher;
