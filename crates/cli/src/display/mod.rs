pub mod formatter;

pub use formatter::{CommandReport, print_command_report};
