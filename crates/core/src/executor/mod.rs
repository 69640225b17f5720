//! Running commands as child processes

pub mod process;
pub mod shell;

pub use process::{ProcessExecutor, SystemExecutor, apply_options};
pub use shell::{Shell, posix_quote};
