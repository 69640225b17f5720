pub mod command;
pub mod execution;
pub mod project;

// Re-export commonly used types
pub use command::{OutputMode, ParsedCommand};
pub use execution::{CommandLine, ExecutionRequest, ExecutionResult};
pub use project::ProjectContext;
