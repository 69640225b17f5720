pub mod dir;
pub mod init;
pub mod parse;
pub mod repl;
pub mod run;
pub mod terminal;

pub use dir::dir_command;
pub use init::init_command;
pub use parse::parse_command;
pub use repl::repl_command;
pub use run::{RunOptions, run_command};
pub use terminal::terminal_command;

use anyhow::Result;
use pipeshell_core::{CommandOrchestrator, ProjectContext, Settings};

use crate::cli::ProjectArgs;

/// Project context, merged settings and an orchestrator built from them
pub(crate) fn open_session(
    project: &ProjectArgs,
) -> Result<(ProjectContext, Settings, CommandOrchestrator)> {
    let context = project.context()?;
    let settings = project.settings(&context)?;
    let orchestrator = CommandOrchestrator::new(&settings)?;
    Ok((context, settings, orchestrator))
}
