//! Parsing of raw prompt text typed by the user

pub mod command_line;

// Re-export commonly used items
pub use command_line::parse_command_line;
